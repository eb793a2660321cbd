//! The `list-functions` command.

use clap::Args;
use rlog_engine::ProviderRegistry;
use serde::Serialize;

#[derive(Args, Clone, Debug)]
pub struct ListFunctionsArgs {
    /// Print a JSON array instead of plain text
    #[arg(long)]
    pub json: bool,
}

/// One module and the functions it provides.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ModuleListing {
    pub module: String,
    pub functions: Vec<String>,
}

/// Modules in lookup order, each with its function names sorted.
pub fn list_functions(registry: &ProviderRegistry) -> Vec<ModuleListing> {
    registry
        .modules()
        .map(|module| ModuleListing {
            module: module.name().to_string(),
            functions: module.function_names().map(str::to_string).collect(),
        })
        .collect()
}

/// Render the listing as plain text, one module per line.
pub fn format_text(listing: &[ModuleListing]) -> String {
    listing
        .iter()
        .map(|entry| format!("{}: {}\n", entry.module, entry.functions.join(", ")))
        .collect()
}

pub fn run_list_functions(args: ListFunctionsArgs) -> anyhow::Result<()> {
    let registry = rlog_engine::load_providers()?;
    let listing = list_functions(&registry);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        print!("{}", format_text(&listing));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_listed_first() {
        let registry = rlog_engine::load_providers().unwrap();
        let listing = list_functions(&registry);
        assert_eq!(listing[0].module, "core");
        assert_eq!(listing[0].functions, vec!["timestamp"]);
        assert!(listing
            .iter()
            .any(|m| m.module == "numeric" && m.functions.contains(&"randint".to_string())));
    }

    #[test]
    fn test_json_shape() {
        let listing = vec![ModuleListing {
            module: "core".to_string(),
            functions: vec!["timestamp".to_string()],
        }];
        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"module": "core", "functions": ["timestamp"]}])
        );
        assert_eq!(format_text(&listing), "core: timestamp\n");
    }
}
