//! Row name allocation

/// Name for the next automatically named row
///
/// One past the largest numeric name, or `0` when there is none.
/// Non-numeric names are ignored.
#[must_use]
pub fn next_row_name<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .filter_map(|name| name.parse::<u64>().ok())
        .max()
        .map_or(0, |max| max.saturating_add(1))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_starts_at_zero() {
        assert_eq!(next_row_name([]), "0");
    }

    #[test]
    fn gaps_are_not_filled() {
        assert_eq!(next_row_name(["0", "1", "3"]), "4");
    }

    #[test]
    fn non_numeric_names_are_ignored() {
        assert_eq!(next_row_name(["home", "work"]), "0");
        assert_eq!(next_row_name(["home", "7"]), "8");
    }

    proptest! {
        #[test]
        fn next_name_is_above_every_numeric_name(names in prop::collection::vec(0u64..10_000, 0..20)) {
            let rendered: Vec<String> = names.iter().map(u64::to_string).collect();
            let next: u64 = next_row_name(rendered.iter().map(String::as_str)).parse().unwrap();

            prop_assert!(names.iter().all(|&n| n < next));
            prop_assert_eq!(next, names.iter().max().map_or(0, |m| m + 1));
        }
    }
}
