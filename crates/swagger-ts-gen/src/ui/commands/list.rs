use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{
  generator::{
    options::GeneratorOptions,
    orchestrator::{OperationSummary, Orchestrator},
  },
  ui::{Colors, FilterArgs, colors::IntoComfyColor, term_width},
  utils::spec::SpecLoader,
};

fn operations_table(operations: &[OperationSummary], colors: &Colors) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for title in ["OPERATION", "METHOD", "PATH", "TAGS"] {
    row.add_cell(Cell::new(title).fg(IntoComfyColor::into(colors.label())));
  }
  table.set_header(row);

  for operation in operations {
    let (name_color, path_color) = if operation.included {
      (colors.value(), colors.primary())
    } else {
      (colors.muted(), colors.muted())
    };

    let mut row = Row::new();
    let name = Cell::new(operation.name.as_deref().unwrap_or("-")).fg(IntoComfyColor::into(name_color));
    row.add_cell(if operation.included {
      name.add_attribute(Attribute::Bold)
    } else {
      name
    });
    row.add_cell(
      Cell::new(operation.method.as_str())
        .fg(IntoComfyColor::into(colors.accent()))
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(&operation.path).fg(IntoComfyColor::into(path_color)));
    row.add_cell(Cell::new(operation.tags.join(", ")).fg(IntoComfyColor::into(colors.info())));
    table.add_row(row);
  }

  table
}

/// Prints every operation in document order. Rows the filters exclude are dimmed.
pub async fn list_operations(input: &Path, filters: &FilterArgs, colors: &Colors) -> anyhow::Result<()> {
  let document = SpecLoader::open(input).await?.parse()?;
  let options = GeneratorOptions::builder().filter(filters.to_filter()?).build();
  let operations = Orchestrator::new(document, options).list_operations();

  println!("{}", operations_table(&operations, colors));

  Ok(())
}
