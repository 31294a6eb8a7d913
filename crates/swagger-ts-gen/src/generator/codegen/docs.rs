use crate::generator::ast::DocTag;

/// Keeps a comment body from closing the block early.
fn comment_text(line: &str) -> String {
  line.replace("*/", "*\\/")
}

fn tag_line(tag: &DocTag) -> String {
  let line = match tag {
    DocTag::Param { name, description } => match description.as_deref().map(str::trim) {
      Some(description) if !description.is_empty() => format!("@param {name} {description}"),
      _ => format!("@param {name}"),
    },
    DocTag::Deprecated => "@deprecated".to_string(),
    DocTag::Returns(description) => match description.as_deref().map(str::trim) {
      Some(description) if !description.is_empty() => format!("@returns {description}"),
      _ => "@returns".to_string(),
    },
  };
  comment_text(&line.replace('\n', " "))
}

/// Writes a `/** ... */` block at `indent`. Nothing is written when both parts are empty.
pub(super) fn write_doc_block(out: &mut String, indent: &str, lines: &[String], tags: &[DocTag]) {
  if lines.is_empty() && tags.is_empty() {
    return;
  }

  out.push_str(indent);
  out.push_str("/**\n");
  for line in lines {
    push_comment_line(out, indent, &comment_text(line));
  }
  if !lines.is_empty() && !tags.is_empty() {
    push_comment_line(out, indent, "");
  }
  for tag in tags {
    push_comment_line(out, indent, &tag_line(tag));
  }
  out.push_str(indent);
  out.push_str(" */\n");
}

fn push_comment_line(out: &mut String, indent: &str, text: &str) {
  out.push_str(indent);
  if text.is_empty() {
    out.push_str(" *\n");
  } else {
    out.push_str(" * ");
    out.push_str(text);
    out.push('\n');
  }
}
