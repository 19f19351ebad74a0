use crate::support;
use collate_handlers::HandlersConfig;

pub fn run(config: &HandlersConfig, input: String, field: String, equals: String) {
    let registry = support::registry_or_exit(config);
    let data = support::load_value_or_exit(&input);
    let expected = support::parse_json_or_exit(&equals, "--equals");
    let handler = support::handler_or_exit(&registry, &data);

    let filtered = handler.filter(&data, &mut |value, _| {
        Ok(value.get(&field) == Some(&expected))
    });
    support::print_value(&support::exit_on_error(filtered));
}
