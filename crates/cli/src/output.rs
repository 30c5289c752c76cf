//! Informational messages and the final markdown or JSON rendering.

use std::io::{self, Write};

use inspectarr_core::fields::RAW_SIZE;
use inspectarr_core::format::{format_qualified_value, format_size};
use inspectarr_core::{FieldDescriptor, Row, Schema, Value, Visibility};

use crate::cli::{OutputArgs, OutputFormat};

#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub quiet: bool,
    pub short_headers: bool,
    pub all: bool,
}

impl From<&OutputArgs> for OutputOptions {
    fn from(args: &OutputArgs) -> Self {
        Self {
            format: args.output,
            // JSON output must stay machine readable
            quiet: args.quiet || args.output == OutputFormat::Json,
            short_headers: args.short_headers,
            all: args.all,
        }
    }
}

pub struct Printer<W> {
    out: W,
    options: OutputOptions,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, options: OutputOptions) -> Self {
        Self { out, options }
    }

    pub fn options(&self) -> &OutputOptions {
        &self.options
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// A line of progress or statistics, dropped when quiet.
    pub fn info(&mut self, message: &str) -> io::Result<()> {
        if self.options.quiet {
            return Ok(());
        }
        writeln!(self.out, "{message}")
    }

    pub fn print_rows(&mut self, schema: &Schema, rows: &[Row]) -> io::Result<()> {
        let rendered = match self.options.format {
            OutputFormat::Md => render_markdown(schema, rows, &self.options),
            OutputFormat::Json => render_json(rows).map_err(io::Error::other)?,
        };
        self.out.write_all(rendered.as_bytes())?;
        self.out.flush()
    }
}

/// `"<n> media entries with a size of <size>"` over the rows' `rawSize`.
pub fn stats(rows: &[Row]) -> String {
    let total: f64 = rows
        .iter()
        .filter_map(|row| row.get(RAW_SIZE).and_then(Value::as_f64))
        .sum();
    let size = format_size(Some(total as u64)).unwrap_or_default();
    format!("{} media entries with a size of {size}", rows.len())
}

pub fn render_json(rows: &[Row]) -> serde_json::Result<String> {
    let mut json = serde_json::to_string(rows)?;
    json.push('\n');
    Ok(json)
}

/// `releaseGroup` → `Release Group`.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else {
            if c.is_uppercase() {
                out.push(' ');
            }
            out.push(c);
        }
    }
    out
}

fn header(field: &FieldDescriptor, short: bool) -> String {
    let title = title_case(field.name);
    if !short {
        return title;
    }
    field
        .alias
        .map(str::to_string)
        .unwrap_or_else(|| title.to_lowercase())
}

fn displayed(field: &FieldDescriptor, all: bool) -> bool {
    match field.visibility {
        Visibility::Visible => true,
        Visibility::Hidden => all,
        Visibility::Internal | Visibility::MergedInto(_) => false,
    }
}

fn cell(schema: &Schema, row: &Row, field: &str) -> String {
    let null = Value::Null;
    let value = row.get(field).unwrap_or(&null);
    let text = match schema.merged_into(field).next() {
        Some(merged) => format_qualified_value(value, row.get(merged.name).unwrap_or(&null), None),
        None => value.to_string(),
    };
    text.replace('|', "\\|")
}

/// Left-aligned, padded markdown table of the displayable columns present in
/// `rows`. Merged fields are folded into their target column.
pub fn render_markdown(schema: &Schema, rows: &[Row], options: &OutputOptions) -> String {
    let columns: Vec<&FieldDescriptor> = schema
        .fields()
        .filter(|f| displayed(f, options.all))
        .filter(|f| rows.iter().any(|row| row.contains(f.name)))
        .collect();
    if columns.is_empty() {
        return String::new();
    }

    let headers: Vec<String> = columns
        .iter()
        .map(|f| header(f, options.short_headers))
        .collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|f| cell(schema, row, f.name)).collect())
        .collect();

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| {
            body.iter()
                .map(|cells| cells[i].chars().count())
                .chain([headers[i].chars().count(), 3])
                .max()
                .unwrap_or(3)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, &headers, &widths);
    let rule: Vec<String> = widths
        .iter()
        .map(|&w| format!(":{}", "-".repeat(w - 1)))
        .collect();
    push_line(&mut out, &rule, &widths);
    for cells in &body {
        push_line(&mut out, cells, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    out.push('|');
    for (cell, &width) in cells.iter().zip(widths) {
        let pad = width - cell.chars().count();
        out.push(' ');
        out.push_str(cell);
        out.extend(std::iter::repeat_n(' ', pad));
        out.push_str(" |");
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use inspectarr_core::fields::base_fields;

    fn schema() -> Schema {
        Schema::new(base_fields())
    }

    fn row(title: &str, year: Option<i32>, group: Option<&str>) -> Row {
        let mut row = Row::new();
        for field in schema().fields() {
            row.set(field.name, Value::Null);
        }
        row.set("title", title);
        row.set("year", year);
        row.set("monitored", true);
        row.set("releaseGroup", group);
        row.set("audioCodec", "DTS");
        row.set("audioChannels", 5.1);
        row.set("qualityProfile", "HD");
        row.set("rawSize", 1500.0);
        row
    }

    fn md(rows: &[Row], options: OutputOptions) -> String {
        render_markdown(&schema(), rows, &options)
    }

    #[test]
    fn title_cases_camel_names() {
        assert_eq!(title_case("releaseGroup"), "Release Group");
        assert_eq!(title_case("title"), "Title");
        assert_eq!(title_case("subtitleLanguage"), "Subtitle Language");
    }

    #[test]
    fn renders_visible_columns_with_merged_values() {
        let out = md(&[row("Dune", Some(2021), Some("NTb"))], OutputOptions::default());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines[0],
            "| Title       | Monitored | Release Group | Source | Video Codec | Audio Codec | Resolution | Size |"
        );
        assert_eq!(
            lines[1],
            "| :---------- | :-------- | :------------ | :----- | :---------- | :---------- | :--------- | :--- |"
        );
        assert_eq!(
            lines[2],
            "| Dune (2021) | true      | NTb           |        |             | DTS (5.1)   |            |      |"
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn hidden_columns_need_all() {
        let rows = [row("Dune", None, None)];
        assert!(!md(&rows, OutputOptions::default()).contains("Quality Profile"));
        let all = OutputOptions {
            all: true,
            ..Default::default()
        };
        let out = md(&rows, all);
        assert!(out.contains("Quality Profile"));
        assert!(!out.contains("Raw Size"));
        assert!(!out.contains("| Year"));
    }

    #[test]
    fn short_headers_use_aliases() {
        let options = OutputOptions {
            short_headers: true,
            ..Default::default()
        };
        let out = md(&[row("Dune", None, None)], options);
        assert!(out.starts_with("| t    | m    | rg  | src | vc  | ac        | rs  | sz  |\n"));
    }

    #[test]
    fn escapes_pipes_and_skips_excluded_columns() {
        let rows = [row("A|B", None, None).without(&["releaseGroup"])];
        let out = md(&rows, OutputOptions::default());
        assert!(out.contains("A\\|B"));
        assert!(!out.contains("Release Group"));
    }

    #[test]
    fn json_keeps_every_field_in_order() {
        let mut row = Row::new();
        row.set("title", "Dune");
        row.set("year", 2021);
        row.set("rawSize", 1.5e9);
        row.set("releaseGroup", Value::Null);
        assert_eq!(
            render_json(&[row]).unwrap(),
            "[{\"title\":\"Dune\",\"year\":2021,\"rawSize\":1500000000,\"releaseGroup\":null}]\n"
        );
    }

    #[test]
    fn stats_sum_raw_sizes() {
        let rows = [row("a", None, None), row("b", None, None)];
        assert_eq!(stats(&rows), "2 media entries with a size of 3 KB");
        assert_eq!(stats(&[]), "0 media entries with a size of 0 B");
    }

    #[test]
    fn quiet_printer_drops_info_but_prints_rows() {
        let options = OutputOptions::from(&OutputArgs {
            output: OutputFormat::Json,
            ..Default::default()
        });
        assert!(options.quiet);

        let mut printer = Printer::new(Vec::new(), options);
        printer.info("Fetching media...").unwrap();
        printer.print_rows(&schema(), &[]).unwrap();
        assert_eq!(String::from_utf8(printer.into_inner()).unwrap(), "[]\n");
    }
}
