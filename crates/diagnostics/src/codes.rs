//! Diagnostic ID constants.
//!
//! `SWO1xxx` codes come from the lexer and entry parser, `SWO2xxx` codes from
//! the options model. Use these instead of string literals.

/// A quoted value was never closed; it was read as a bare value.
pub const UNTERMINATED_QUOTE: &str = "SWO1001";
/// A value appeared before any `--option` name and was ignored.
pub const STRAY_VALUE: &str = "SWO1002";
/// The same option appears more than once; the last occurrence wins.
pub const DUPLICATE_OPTION: &str = "SWO1003";
/// A reserve-type list holds something other than `regulation`/`contingency`.
pub const UNKNOWN_RESERVE_TYPE: &str = "SWO2001";
/// A numeric option (or solver parameter) does not coerce to a finite number.
/// An error for options, a warning for solver parameters.
pub const NOT_A_NUMBER: &str = "SWO2002";
/// The document has no option entries at all.
pub const NO_OPTIONS: &str = "SWO2003";
/// A scenarios-file line has options but no `--scenario-name`.
pub const MISSING_SCENARIO_NAME: &str = "SWO2004";
/// Two scenario lines share the same name.
pub const DUPLICATE_SCENARIO: &str = "SWO2005";

/// Every known code, in numeric order.
pub const ALL: &[&str] = &[
    UNTERMINATED_QUOTE,
    STRAY_VALUE,
    DUPLICATE_OPTION,
    UNKNOWN_RESERVE_TYPE,
    NOT_A_NUMBER,
    NO_OPTIONS,
    MISSING_SCENARIO_NAME,
    DUPLICATE_SCENARIO,
];

pub(crate) fn explanation(id: &str) -> Option<&'static str> {
    let text = match id {
        UNTERMINATED_QUOTE => {
            "A quoted value has no closing quote. The text from the opening quote up to the \
             next whitespace is used as a bare value instead."
        }
        STRAY_VALUE => {
            "A value was found before any `--option` name. Values only belong to the option \
             that precedes them, so this one is ignored."
        }
        DUPLICATE_OPTION => {
            "The option is given more than once. When the file is read, the last occurrence \
             wins; edits always target the first occurrence."
        }
        UNKNOWN_RESERVE_TYPE => {
            "Reserve-type options accept `regulation` and `contingency` only. Other values \
             are passed through to the model unchanged."
        }
        NOT_A_NUMBER => {
            "The option (or solver parameter) expects a number but its value does not \
             convert to a finite number. This is an error for a numeric option and a \
             warning for a solver parameter."
        }
        NO_OPTIONS => "The document contains no `--option` entries.",
        MISSING_SCENARIO_NAME => {
            "Each line of a scenarios file defines one scenario and must contain \
             `--scenario-name <name>`. Lines without it are ignored."
        }
        DUPLICATE_SCENARIO => {
            "Two lines define a scenario with the same name. Lookups and edits use the \
             first matching line."
        }
        _ => return None,
    };
    Some(text)
}
