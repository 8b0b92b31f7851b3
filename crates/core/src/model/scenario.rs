use serde::Serialize;

use super::{Options, SCENARIO_NAME, lines_with_offsets};
use crate::grammar::parser::parse_with_offset;

/// One line of a scenarios file that carries `--scenario-name`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    /// The line's options, `scenarioName` included.
    #[serde(flatten)]
    pub options: Options,
    /// 0-based line index in the scenarios file.
    #[serde(skip)]
    pub line: usize,
    /// Absolute byte offset of the line's first character.
    #[serde(skip)]
    pub offset: usize,
}

impl Scenario {
    /// The scenario name, unless `--scenario-name` was written without a value.
    pub fn name(&self) -> Option<&str> {
        self.options.scenario_name()
    }
}

/// Whether a record counts as a scenario: it has a `scenarioName` key.
pub fn is_scenario(options: &Options) -> bool {
    options.contains_key(SCENARIO_NAME)
}

/// Extract scenarios from a scenarios file, one per line, in line order.
///
/// Lines without `--scenario-name` (blank lines, comments, malformed lines)
/// produce nothing.
pub fn to_scenarios(text: &str) -> Vec<Scenario> {
    lines_with_offsets(text)
        .filter_map(|(line, offset, content)| {
            let options = Options::from_document(&parse_with_offset(content, offset));
            is_scenario(&options).then_some(Scenario {
                options,
                line,
                offset,
            })
        })
        .collect()
}

/// First scenario called `name`.
pub fn find_scenario<'a>(scenarios: &'a [Scenario], name: &str) -> Option<&'a Scenario> {
    scenarios.iter().find(|s| s.name() == Some(name))
}
