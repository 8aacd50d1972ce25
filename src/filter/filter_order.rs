use super::error::FilterError;
use super::types::{is_valid_identifier, FilterOrderInfo, SortDirection};

pub struct FilterOrder;

impl FilterOrder {
    /// Parses `"last_name, id desc"`; direction defaults to ascending
    pub fn validate_and_parse(order: &str) -> Result<Vec<FilterOrderInfo>, FilterError> {
        let mut infos = Vec::new();
        for part in order.split(',') {
            let mut words = part.split_whitespace();
            let Some(column) = words.next() else { continue };
            let sort = match words.next() {
                None => SortDirection::Asc,
                Some(dir) if dir.eq_ignore_ascii_case("asc") => SortDirection::Asc,
                Some(dir) if dir.eq_ignore_ascii_case("desc") => SortDirection::Desc,
                Some(_) => return Err(FilterError::InvalidOrder(part.trim().to_string())),
            };
            if words.next().is_some() {
                return Err(FilterError::InvalidOrder(part.trim().to_string()));
            }
            if !is_valid_identifier(column) {
                return Err(FilterError::InvalidColumn(column.to_string()));
            }
            infos.push(FilterOrderInfo { column: column.to_string(), sort });
        }
        Ok(infos)
    }

    pub fn generate(infos: &[FilterOrderInfo]) -> String {
        if infos.is_empty() { return String::new(); }
        let parts: Vec<String> = infos
            .iter()
            .map(|i| format!("\"{}\" {}", i.column, i.sort.to_sql()))
            .collect();
        format!("ORDER BY {}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_column_list() {
        let infos = FilterOrder::validate_and_parse("last_name, first_name DESC").unwrap();
        assert_eq!(FilterOrder::generate(&infos), "ORDER BY \"last_name\" ASC, \"first_name\" DESC");
        assert_eq!(infos[1].sort, SortDirection::Desc);

        assert!(FilterOrder::validate_and_parse("").unwrap().is_empty());
        assert_eq!(FilterOrder::generate(&[]), "");
    }

    #[test]
    fn rejects_bad_columns_and_directions() {
        assert!(matches!(
            FilterOrder::validate_and_parse("id; DROP TABLE students"),
            Err(FilterError::InvalidColumn(_))
        ));
        assert!(matches!(FilterOrder::validate_and_parse("id sideways"), Err(FilterError::InvalidOrder(_))));
        assert!(matches!(FilterOrder::validate_and_parse("id asc nulls"), Err(FilterError::InvalidOrder(_))));
    }
}
