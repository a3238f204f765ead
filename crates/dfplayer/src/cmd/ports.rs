use dfplayer_transport::{available_ports, PortInfo};
use serde::Serialize;

use crate::exit::{transport_error, CliResult, SUCCESS};
use crate::output::{new_table, to_json, OutputFormat};

#[derive(Serialize)]
struct PortOutput<'a> {
    name: &'a str,
    kind: &'a str,
    description: Option<&'a str>,
}

impl<'a> From<&'a PortInfo> for PortOutput<'a> {
    fn from(port: &'a PortInfo) -> Self {
        Self {
            name: &port.name,
            kind: port.kind,
            description: port.description.as_deref(),
        }
    }
}

pub fn run(format: OutputFormat) -> CliResult<i32> {
    let ports = available_ports().map_err(|err| transport_error("port scan failed", err))?;
    let out: Vec<PortOutput<'_>> = ports.iter().map(PortOutput::from).collect();

    match format {
        OutputFormat::Json => println!("{}", to_json(&out)),
        OutputFormat::Table => {
            let mut table = new_table(vec!["PORT", "KIND", "DESCRIPTION"]);
            for port in &out {
                table.add_row(vec![
                    port.name,
                    port.kind,
                    port.description.unwrap_or("-"),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for port in &out {
                match port.description {
                    Some(description) => println!("{} ({}, {description})", port.name, port.kind),
                    None => println!("{} ({})", port.name, port.kind),
                }
            }
        }
        OutputFormat::Raw => {
            for port in &out {
                println!("{}", port.name);
            }
        }
    }

    Ok(SUCCESS)
}
