//! Word splitting and case conversion for option names.
//!
//! Words are runs of lower-case letters (optionally led by one capital),
//! runs of capitals, or runs of digits. Any other character separates
//! words. A run of capitals gives up its last letter when a lower-case
//! letter follows it, so `XMLFile` splits as `XML` + `File`.

fn is_lower(c: char) -> bool {
    c.is_alphabetic() && !c.is_uppercase()
}

/// Split `s` into words.
pub fn words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let n = chars.len();
    let mut out = Vec::new();
    let mut i = 0;
    while i < n {
        let c = chars[i];
        if !c.is_alphanumeric() {
            i += 1;
            continue;
        }
        let start = i;
        if c.is_numeric() {
            while i < n && chars[i].is_numeric() {
                i += 1;
            }
        } else if c.is_uppercase() {
            let mut j = i;
            while j < n && chars[j].is_uppercase() {
                j += 1;
            }
            if j < n && is_lower(chars[j]) {
                if j - i > 1 {
                    j -= 1;
                } else {
                    while j < n && is_lower(chars[j]) {
                        j += 1;
                    }
                }
            }
            i = j;
        } else {
            while i < n && is_lower(chars[i]) {
                i += 1;
            }
        }
        out.push(chars[start..i].iter().collect());
    }
    out
}

/// `scenario-name` → `scenarioName`.
pub fn camel_case(s: &str) -> String {
    let mut out = String::new();
    for (idx, word) in words(s).iter().enumerate() {
        let lower = word.to_lowercase();
        if idx == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// `scenarioName` → `scenario-name`.
pub fn kebab_case(s: &str) -> String {
    words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Lower-cased words run together: `Primal Opt` → `primalopt`.
pub fn squash_lower(s: &str) -> String {
    words(s).iter().map(|w| w.to_lowercase()).collect()
}
