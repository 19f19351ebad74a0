use collate_handlers::HandlersConfig;

pub fn run(config: &HandlersConfig) {
    let text = config.to_toml_string().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    print!("{text}");
}
