use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// One result printed as a JSON object, a two-column table, `key=value`
/// pairs, or just its headline value.
pub struct Record<'a, T: Serialize> {
    pub data: &'a T,
    pub fields: Vec<(&'static str, String)>,
    pub raw: String,
}

impl<T: Serialize> Record<'_, T> {
    pub fn print(&self, format: OutputFormat) {
        match format {
            OutputFormat::Json => println!("{}", to_json(self.data)),
            OutputFormat::Table => {
                let mut table = new_table(vec!["FIELD", "VALUE"]);
                for (name, value) in &self.fields {
                    table.add_row(vec![name.to_string(), value.clone()]);
                }
                println!("{table}");
            }
            OutputFormat::Pretty => {
                let line = self
                    .fields
                    .iter()
                    .map(|(name, value)| format!("{name}={value}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("{line}");
            }
            OutputFormat::Raw => println!("{}", self.raw),
        }
    }
}

pub fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Sample {
        volume: u8,
    }

    #[test]
    fn json_uses_serialized_data() {
        assert_eq!(to_json(&Sample { volume: 22 }), "{\"volume\":22}");
    }

    #[test]
    fn table_has_header_and_rows() {
        let mut table = new_table(vec!["FIELD", "VALUE"]);
        table.add_row(vec!["volume", "22"]);
        let rendered = table.to_string();
        assert!(rendered.contains("FIELD"));
        assert!(rendered.contains("22"));
    }
}
