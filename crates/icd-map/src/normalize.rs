//! Text normalization shared by rule matching and similarity scoring.
//!
//! The output of [`normalize`] is the comparison key for every strategy in
//! the engine: input diagnoses, catalog descriptions and rule keywords all
//! pass through it, so the qualifier and abbreviation tables apply equally to
//! both sides of every comparison.

/// Qualifier phrases removed at token boundaries.
const QUALIFIERS: &[&[&str]] = &[
    &["without", "mention", "of"],
    &["unspecified"],
    &["unspec"],
    &["nos"],
    &["due", "to"],
];

/// Clinical shorthand expanded at token boundaries.
///
/// Expansions never contain an abbreviation or a qualifier.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("dm", "diabetes mellitus"),
    ("htn", "hypertension"),
    ("copd", "chronic obstructive pulmonary disease"),
    ("ckd", "chronic kidney disease"),
    ("chf", "congestive heart failure"),
    ("mi", "myocardial infarction"),
    ("cad", "coronary artery disease"),
    ("afib", "atrial fibrillation"),
    ("dvt", "deep vein thrombosis"),
    ("pe", "pulmonary embolism"),
    ("uti", "urinary tract infection"),
    ("esrd", "end stage renal disease"),
    ("gi", "gastrointestinal"),
    ("sob", "shortness of breath"),
];

/// Normalizes diagnosis text into a comparison key.
///
/// Lowercases, expands `w/` and `w/o`, replaces punctuation with spaces
/// (keeping a dot between an alphanumeric and a digit, as in `e11.9`),
/// expands abbreviations, strips qualifier phrases, rewrites `type i`/`type ii`
/// to `type 1`/`type 2`, and collapses whitespace. Total and idempotent.
///
/// ```
/// use icd_map::normalize;
///
/// assert_eq!(
///     normalize("Diabetes mellitus without mention of complication, type II"),
///     "diabetes mellitus complication type 2"
/// );
/// assert_eq!(normalize("HTN, unspecified"), "hypertension");
/// assert_eq!(normalize("   "), "");
/// ```
pub fn normalize(text: &str) -> String {
    let lowered = expand_with_shorthand(&text.to_lowercase());
    let cleaned = strip_punctuation(&lowered);

    let mut tokens: Vec<&str> = Vec::new();
    for token in cleaned.split_whitespace() {
        match expand_abbreviation(token) {
            Some(expansion) => tokens.extend(expansion.split(' ')),
            None => tokens.push(token),
        }
    }

    let mut tokens = strip_qualifiers(tokens);
    rewrite_type_numerals(&mut tokens);
    tokens.join(" ")
}

/// Splits normalized text into its tokens.
pub fn tokens(normalized: &str) -> Vec<&str> {
    normalized.split_whitespace().collect()
}

fn expand_with_shorthand(text: &str) -> String {
    text.split_whitespace()
        .map(|token| {
            if let Some(rest) = token.strip_prefix("w/o") {
                format!("without {rest}")
            } else if let Some(rest) = token.strip_prefix("w/") {
                format!("with {rest}")
            } else {
                token.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_punctuation(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (idx, &ch) in chars.iter().enumerate() {
        if ch.is_alphanumeric() {
            out.push(ch);
        } else if ch == '.' && is_code_dot(&chars, idx) {
            out.push('.');
        } else {
            out.push(' ');
        }
    }
    out
}

fn is_code_dot(chars: &[char], idx: usize) -> bool {
    let prev = idx.checked_sub(1).and_then(|i| chars.get(i));
    let next = chars.get(idx + 1);
    matches!(prev, Some(ch) if ch.is_alphanumeric())
        && matches!(next, Some(ch) if ch.is_ascii_digit())
}

fn expand_abbreviation(token: &str) -> Option<&'static str> {
    ABBREVIATIONS
        .iter()
        .find(|(abbrev, _)| *abbrev == token)
        .map(|(_, expansion)| *expansion)
}

/// Removes qualifier phrases until none remain; removing one phrase can
/// bring the pieces of another together.
fn strip_qualifiers(mut tokens: Vec<&str>) -> Vec<&str> {
    loop {
        let mut kept = Vec::with_capacity(tokens.len());
        let mut changed = false;
        let mut idx = 0;
        while idx < tokens.len() {
            let rest = &tokens[idx..];
            if let Some(phrase) = QUALIFIERS.iter().find(|phrase| rest.starts_with(phrase)) {
                idx += phrase.len();
                changed = true;
            } else {
                kept.push(tokens[idx]);
                idx += 1;
            }
        }
        tokens = kept;
        if !changed {
            return tokens;
        }
    }
}

fn rewrite_type_numerals(tokens: &mut [&str]) {
    for idx in 1..tokens.len() {
        if tokens[idx - 1] != "type" {
            continue;
        }
        match tokens[idx] {
            "i" => tokens[idx] = "1",
            "ii" => tokens[idx] = "2",
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_collapses_whitespace() {
        assert_eq!(
            normalize("  Essential   (primary)\tHypertension "),
            "essential primary hypertension"
        );
    }

    #[test]
    fn keeps_dots_inside_codes_only() {
        assert_eq!(normalize("E11.9."), "e11.9");
        assert_eq!(normalize("stage 3. moderate"), "stage 3 moderate");
        assert_eq!(normalize(".5 mg"), "5 mg");
    }

    #[test]
    fn strips_qualifiers_at_token_boundaries() {
        assert_eq!(normalize("Anemia, unspecified"), "anemia");
        assert_eq!(
            normalize("Obesity due to excess calories"),
            "obesity excess calories"
        );
        assert_eq!(normalize("Asthma NOS"), "asthma");
        assert_eq!(normalize("diagnosis"), "diagnosis");
    }

    #[test]
    fn qualifier_removal_repeats_until_stable() {
        assert_eq!(normalize("without without mention of mention of fever"), "fever");
    }

    #[test]
    fn expands_shorthand_and_abbreviations() {
        assert_eq!(
            normalize("DM w/o complications"),
            "diabetes mellitus without complications"
        );
        assert_eq!(
            normalize("CKD w/HTN"),
            "chronic kidney disease with hypertension"
        );
        assert_eq!(normalize("h/o MI"), "h o myocardial infarction");
    }

    #[test]
    fn rewrites_roman_type_numerals() {
        assert_eq!(normalize("Type II diabetes"), "type 2 diabetes");
        assert_eq!(normalize("type I DM"), "type 1 diabetes mellitus");
        assert_eq!(normalize("stage ii"), "stage ii");
    }

    #[test]
    fn empty_and_punctuation_only_inputs_normalize_to_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" ,;- "), "");
        assert_eq!(normalize("unspecified"), "");
    }
}
