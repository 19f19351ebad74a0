use crate::support;
use collate_handlers::HandlersConfig;
use collate_kernel::to_json;

pub fn run(config: &HandlersConfig, input: String) {
    let registry = support::registry_or_exit(config);
    let data = support::load_value_or_exit(&input);
    let handler = support::handler_or_exit(&registry, &data);

    for (key, value) in support::exit_on_error(handler.get_iterator(&data)) {
        println!("{key}\t{}", to_json(value));
    }
}
