use gscellvalue::{Attributes, GsCellValue, SheetRegistry};

fn usage<T>(err: &'static str) -> anyhow::Result<T> {
    let exe = std::env::args().next().unwrap_or_default();
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("Usage: {exe} [options] <sheet> <find> <return>\n");
    println!("Options:");
    println!("    --registry: Path to a JSON file mapping sheet names to spreadsheet keys");
    println!("    --default: Value to print when the matched cell is empty\n");
    Err(anyhow::Error::msg(err))
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let mut args = pico_args::Arguments::from_env();
    let registry_path = args.opt_value_from_str::<_, String>("--registry")?;
    let default = args.opt_value_from_str::<_, String>("--default")?;
    let _ = args.contains("--");

    let Some(sheet) = args.opt_free_from_str::<String>()? else {
        return usage("Missing sheet argument");
    };
    let Some(find) = args.opt_free_from_str::<String>()? else {
        return usage("Missing find argument");
    };
    let Some(return_column) = args.opt_free_from_str::<String>()? else {
        return usage("Missing return column argument");
    };

    if !args.finish().is_empty() {
        return usage("Unknown extra arguments passed");
    }

    let registry = if let Some(path) = registry_path {
        SheetRegistry::from_json(&std::fs::read_to_string(path)?)?
    } else {
        SheetRegistry::new()
    };

    let attributes = Attributes {
        sheet: Some(&sheet),
        find: Some(&find),
        return_column: Some(&return_column),
        default: default.as_deref(),
        wikitext: false,
    };

    println!("{}", GsCellValue::new(registry).render(&attributes, None));
    Ok(())
}
