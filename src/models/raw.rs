use std::collections::HashMap;

/// One row of a source file prior to validation: column name to raw cell.
///
/// Missing values arrive as empty strings; readers normalise the `-9999`
/// sentinel to empty before the row reaches the validator.
pub type RawRow = HashMap<String, String>;

/// One source file's tabular content prior to validation.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// File stem of the source file, used to name per-file quarantine logs.
    pub label: String,
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(label: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            label: label.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Rename columns in place, in both the column list and every row.
    ///
    /// Columns without an entry in the map keep their name.
    pub fn rename_columns(&mut self, renames: &[(&str, &str)]) {
        let map: HashMap<&str, &str> = renames.iter().copied().collect();

        for column in &mut self.columns {
            if let Some(new_name) = map.get(column.as_str()) {
                *column = (*new_name).to_string();
            }
        }

        for row in &mut self.rows {
            for (old, new) in renames {
                if let Some(value) = row.remove(*old) {
                    row.insert((*new).to_string(), value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_columns() {
        let mut table = RawTable::new(
            "file_a",
            vec!["REGIAO:".to_string(), "UF:".to_string()],
        );
        let mut row = RawRow::new();
        row.insert("REGIAO:".to_string(), "SE".to_string());
        row.insert("UF:".to_string(), "SP".to_string());
        table.rows.push(row);

        table.rename_columns(&[("REGIAO:", "Region"), ("UF:", "State")]);

        assert_eq!(table.columns, vec!["Region", "State"]);
        assert_eq!(table.rows[0].get("Region").map(String::as_str), Some("SE"));
        assert!(table.rows[0].get("REGIAO:").is_none());
    }

    #[test]
    fn test_rename_leaves_unmapped_columns() {
        let mut table = RawTable::new("file_b", vec!["Extra".to_string()]);
        table.rename_columns(&[("REGIAO:", "Region")]);
        assert_eq!(table.columns, vec!["Extra"]);
    }
}
