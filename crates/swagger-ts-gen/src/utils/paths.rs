use std::path::{Component, Path, PathBuf};

use itertools::Itertools;

/// Joins URL path pieces with POSIX semantics: empty pieces are skipped, duplicate `/` collapse,
/// `.` and `..` segments resolve, and a trailing `/` survives.
pub(crate) fn posix_join(parts: &[&str]) -> String {
  let joined = parts.iter().filter(|part| !part.is_empty()).join("/");
  posix_normalize(&joined)
}

pub(crate) fn posix_normalize(path: &str) -> String {
  if path.is_empty() {
    return ".".to_string();
  }

  let absolute = path.starts_with('/');
  let trailing = path.ends_with('/');
  let mut segments: Vec<&str> = Vec::new();

  for segment in path.split('/') {
    match segment {
      "" | "." => {}
      ".." => {
        if segments.last().is_some_and(|last| *last != "..") {
          segments.pop();
        } else if !absolute {
          segments.push("..");
        }
      }
      other => segments.push(other),
    }
  }

  let mut normalized = segments.join("/");
  if absolute {
    normalized.insert(0, '/');
  }
  if normalized.is_empty() {
    normalized.push('.');
  }
  if trailing && !normalized.ends_with('/') {
    normalized.push('/');
  }
  normalized
}

/// Resolves `.` and `..` lexically without touching the file system.
fn lexical_absolute(path: &Path) -> std::io::Result<PathBuf> {
  let base = if path.is_absolute() {
    PathBuf::new()
  } else {
    std::env::current_dir()?
  };

  let mut resolved = PathBuf::new();
  for component in base.join(path).components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        resolved.pop();
      }
      other => resolved.push(other),
    }
  }
  Ok(resolved)
}

/// The ES module specifier that reaches `module` inside `target_dir` from a file in `from_dir`.
pub(crate) fn relative_module_specifier(from_dir: &Path, target_dir: &Path, module: &str) -> std::io::Result<String> {
  let from = lexical_absolute(from_dir)?;
  let target = lexical_absolute(target_dir)?;

  let from_parts: Vec<_> = from.components().collect();
  let target_parts: Vec<_> = target.components().collect();
  let common = from_parts
    .iter()
    .zip(&target_parts)
    .take_while(|(a, b)| a == b)
    .count();

  let mut segments: Vec<String> = std::iter::repeat_n("..".to_string(), from_parts.len() - common).collect();
  segments.extend(
    target_parts[common..]
      .iter()
      .map(|part| part.as_os_str().to_string_lossy().into_owned()),
  );
  segments.push(module.to_string());

  let specifier = segments.join("/");
  if specifier.starts_with("..") {
    Ok(specifier)
  } else {
    Ok(format!("./{specifier}"))
  }
}
