use crate::support;
use collate_handlers::HandlersConfig;

pub fn run(config: &HandlersConfig, input: String) {
    let registry = support::registry_or_exit(config);
    let data = support::load_value_or_exit(&input);
    let handler = support::handler_or_exit(&registry, &data);

    println!("{}", support::exit_on_error(handler.count(&data)));
}
