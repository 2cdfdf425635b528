//! Splitting a diagnosis cell into individual diagnosis strings.

/// Delimiters tried in order; the first one present splits the cell.
const DELIMITERS: &[char] = &[';', ',', '\n', '|'];

/// Leading labels removed from an item (case-insensitive, first match only).
const PREFIXES: &[&str] = &["diagnosis:", "dx:", "condition:", "history of", "h/o", "hx of"];

/// Placeholder entries that carry no diagnosis.
const NON_DIAGNOSES: &[&str] = &[
    "none",
    "n/a",
    "na",
    "nil",
    "no diagnosis",
    "unknown",
    "unclear",
    "pending",
    "tbd",
    "to be determined",
    "see notes",
];

const MIN_DIAGNOSIS_CHARS: usize = 3;

/// Splits a diagnosis cell into cleaned diagnosis strings.
///
/// A bracketed list of quoted strings (`['Fever', "Anemia"]`) is read as a
/// list. Anything else is split on the first delimiter present among `;`,
/// `,`, newline and `|`, or kept as a single item. Every item then goes
/// through [`clean_diagnosis`].
///
/// ```
/// use icd_ingest::parse_diagnoses;
///
/// assert_eq!(
///     parse_diagnoses("Hypertension; Dx: type 2 diabetes; N/A"),
///     vec!["Hypertension", "type 2 diabetes"]
/// );
/// assert_eq!(parse_diagnoses("['Fever', \"Anemia\"]"), vec!["Fever", "Anemia"]);
/// ```
pub fn parse_diagnoses(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let items: Vec<String> = match parse_list_literal(text) {
        Some(items) => items,
        None => split_delimited(text),
    };
    items
        .iter()
        .map(String::as_str)
        .filter_map(clean_diagnosis)
        .collect()
}

/// Cleans one diagnosis item, returning `None` when nothing useful remains.
///
/// Strips surrounding quotes and one leading label such as `Dx:` or
/// `history of`, collapses whitespace, and drops items shorter than three
/// characters or placeholder values such as `N/A` or `pending`.
pub fn clean_diagnosis(item: &str) -> Option<String> {
    let mut cleaned = item.trim_matches(|ch| ch == '\'' || ch == '"').trim();

    for prefix in PREFIXES {
        let matches = cleaned
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
        if matches {
            cleaned = cleaned[prefix.len()..].trim();
            break;
        }
    }

    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() < MIN_DIAGNOSIS_CHARS {
        return None;
    }
    let lowered = collapsed.to_lowercase();
    if NON_DIAGNOSES.contains(&lowered.as_str()) {
        return None;
    }
    Some(collapsed)
}

fn split_delimited(text: &str) -> Vec<String> {
    match DELIMITERS.iter().find(|delimiter| text.contains(**delimiter)) {
        Some(delimiter) => text
            .split(*delimiter)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        None => vec![text.to_string()],
    }
}

/// Parses `[...]` containing quoted strings or bare numbers separated by
/// commas. Returns `None` for anything else so the caller can fall back to
/// delimiter splitting.
fn parse_list_literal(text: &str) -> Option<Vec<String>> {
    let inner = text.strip_prefix('[')?.strip_suffix(']')?;
    let mut chars = inner.chars().peekable();
    let mut items = Vec::new();

    loop {
        while chars.peek().is_some_and(|ch| ch.is_whitespace()) {
            chars.next();
        }
        let Some(&first) = chars.peek() else {
            break;
        };

        let item = if first == '\'' || first == '"' {
            chars.next();
            let mut value = String::new();
            let mut closed = false;
            while let Some(ch) = chars.next() {
                match ch {
                    '\\' => match chars.next()? {
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        other => value.push(other),
                    },
                    ch if ch == first => {
                        closed = true;
                        break;
                    }
                    ch => value.push(ch),
                }
            }
            if !closed {
                return None;
            }
            value
        } else {
            let mut value = String::new();
            while let Some(&ch) = chars.peek() {
                if ch == ',' || ch.is_whitespace() {
                    break;
                }
                value.push(ch);
                chars.next();
            }
            if value.parse::<f64>().is_err() {
                return None;
            }
            value
        };
        items.push(item);

        while chars.peek().is_some_and(|ch| ch.is_whitespace()) {
            chars.next();
        }
        match chars.next() {
            Some(',') | None => {}
            Some(_) => return None,
        }
    }
    Some(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_present_delimiter() {
        assert_eq!(
            parse_diagnoses("Fever; Anemia, iron deficiency"),
            vec!["Fever", "Anemia, iron deficiency"]
        );
        assert_eq!(parse_diagnoses("Fever, Anemia"), vec!["Fever", "Anemia"]);
        assert_eq!(parse_diagnoses("Fever\nAnemia"), vec!["Fever", "Anemia"]);
        assert_eq!(parse_diagnoses("Fever | Anemia"), vec!["Fever", "Anemia"]);
        assert_eq!(
            parse_diagnoses("Essential hypertension"),
            vec!["Essential hypertension"]
        );
    }

    #[test]
    fn reads_list_literals() {
        assert_eq!(
            parse_diagnoses(r#"['Type 2 diabetes', "COPD, severe", 'Patient\'s asthma']"#),
            vec!["Type 2 diabetes", "COPD, severe", "Patient's asthma"]
        );
        assert!(parse_diagnoses("[]").is_empty());
    }

    #[test]
    fn malformed_list_literal_falls_back_to_splitting() {
        assert_eq!(parse_list_literal("[fever, anemia]"), None);
        assert_eq!(parse_list_literal("['fever'"), None);
        assert_eq!(parse_list_literal("['fever' 'anemia']"), None);
        assert_eq!(
            parse_diagnoses("['fever', 'anemia'"),
            vec!["['fever", "anemia"]
        );
    }

    #[test]
    fn strips_labels_and_quotes() {
        assert_eq!(clean_diagnosis("\"Dx: Pneumonia\"").as_deref(), Some("Pneumonia"));
        assert_eq!(
            clean_diagnosis("History of   atrial\tfibrillation").as_deref(),
            Some("atrial fibrillation")
        );
        assert_eq!(
            clean_diagnosis("condition: dx: sepsis").as_deref(),
            Some("dx: sepsis")
        );
    }

    #[test]
    fn drops_short_and_placeholder_items() {
        for item in ["", "  ", "MI", "h/o MI", "N/A", "none", "To Be Determined", "'tbd'"] {
            assert_eq!(clean_diagnosis(item), None, "{item:?}");
        }
        assert_eq!(clean_diagnosis("UTI").as_deref(), Some("UTI"));
    }

    #[test]
    fn delimiter_only_text_yields_nothing() {
        assert!(parse_diagnoses(" ;; ").is_empty());
        assert!(parse_diagnoses("").is_empty());
    }
}
