use collate_handlers::{HandlerError, HandlerRegistry, HandlersConfig, SequenceHandler};
use collate_kernel::{Value, from_json, to_json};
use std::fs;
use std::path::Path;

pub fn load_config_or_exit(path: Option<&Path>) -> HandlersConfig {
    let Some(path) = path else {
        return HandlersConfig::default();
    };
    HandlersConfig::load(path).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn registry_or_exit(config: &HandlersConfig) -> HandlerRegistry {
    config.build_registry().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn parse_json_or_exit(text: &str, origin: &str) -> Value {
    let json: serde_json::Value = serde_json::from_str(text).unwrap_or_else(|e| {
        eprintln!("error: invalid json in {origin}: {e}");
        std::process::exit(1);
    });
    from_json(&json).unwrap_or_else(|e| {
        eprintln!("error: {origin}: {e}");
        std::process::exit(1);
    })
}

pub fn load_value_or_exit(path: &str) -> Value {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: failed to read {path}: {e}");
        std::process::exit(1);
    });
    parse_json_or_exit(&text, path)
}

/// The handler for `data`. When nothing supports it, the first registered
/// handler answers so its capability guard reports the problem.
pub fn handler_or_exit<'r>(registry: &'r HandlerRegistry, data: &Value) -> &'r dyn SequenceHandler {
    registry
        .sequence_handler_for(data)
        .or_else(|| registry.sequence_handlers().next())
        .unwrap_or_else(|| {
            eprintln!("error: no sequence handlers are registered");
            std::process::exit(1);
        })
}

pub fn exit_on_error<T>(result: Result<T, HandlerError>) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    })
}

pub fn print_value(value: &Value) {
    println!("{:#}", to_json(value));
}
