use crate::support;
use collate_handlers::{CandidateSet, HandlersConfig};
use std::path::Path;

pub fn run(config: &HandlersConfig, inputs: Vec<String>) {
    let registry = support::registry_or_exit(config);

    let mut candidates = CandidateSet::new();
    for input in &inputs {
        let name = Path::new(input)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| input.clone());
        candidates.push(name, support::load_value_or_exit(input));
    }

    tracing::debug!(candidates = candidates.len(), "merging inputs");
    support::print_value(&support::exit_on_error(registry.merge(candidates)));
}
