use crate::support;
use collate_handlers::{HandlersConfig, TransformResult};

pub fn run(config: &HandlersConfig, input: String, field: String) {
    let registry = support::registry_or_exit(config);
    let data = support::load_value_or_exit(&input);
    let handler = support::handler_or_exit(&registry, &data);

    let flattened = handler.flatten(&data, &mut |value, _| {
        Ok(TransformResult::from(value.get(&field).cloned()))
    });
    support::print_value(&support::exit_on_error(flattened));
}
