pub(crate) mod identifiers;

#[cfg(test)]
mod tests;
