use ndarray::{Array2, ArrayView1, Axis};

use crate::dimension::{Dimension, Item};
use crate::source::SurveyTable;
use crate::types::ItemCode;

/// Respondents × item codes, `NaN` where an answer is missing or unmapped.
#[derive(Clone, Debug)]
pub struct EncodedMatrix {
    items: Vec<&'static Item>,
    dimensions: Vec<Dimension>,
    values: Array2<f64>,
}

impl EncodedMatrix {
    /// Item codes present in the matrix, in funnel order.
    pub fn codes(&self) -> Vec<ItemCode> {
        self.items.iter().map(|item| item.code).collect()
    }

    /// Number of respondents.
    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    /// The full value matrix.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    fn index_of(&self, code: &str) -> Option<usize> {
        self.items.iter().position(|item| item.code == code)
    }

    /// Encoded answers of one item.
    pub fn column(&self, code: &str) -> Option<ArrayView1<'_, f64>> {
        self.index_of(code).map(|idx| self.values.column(idx))
    }

    /// Dimension an item code belongs to.
    pub fn dimension_of(&self, code: &str) -> Option<Dimension> {
        self.index_of(code).map(|idx| self.dimensions[idx])
    }

    /// Codes of `dimension` whose columns were present.
    pub fn dimension_codes(&self, dimension: Dimension) -> Vec<ItemCode> {
        self.items
            .iter()
            .zip(&self.dimensions)
            .filter(|(_, dim)| **dim == dimension)
            .map(|(item, _)| item.code)
            .collect()
    }

    /// Rows with no missing value across `codes`, restricted to those columns.
    ///
    /// Unknown codes are ignored.
    pub fn complete_cases(&self, codes: &[ItemCode]) -> Array2<f64> {
        let indices: Vec<usize> = codes.iter().filter_map(|code| self.index_of(code)).collect();
        let selected = self.values.select(Axis(1), &indices);
        let keep: Vec<usize> = selected
            .axis_iter(Axis(0))
            .enumerate()
            .filter(|(_, row)| row.iter().all(|value| !value.is_nan()))
            .map(|(idx, _)| idx)
            .collect();
        selected.select(Axis(0), &keep)
    }
}

/// Encode every declared item whose column exists in `table`.
pub fn encode_dimensions(table: &SurveyTable) -> EncodedMatrix {
    let mut items = Vec::new();
    let mut dimensions = Vec::new();
    for dimension in Dimension::ALL {
        for item in dimension.items() {
            if table.has_column(item.column) {
                items.push(item);
                dimensions.push(dimension);
            }
        }
    }
    let mut values = Array2::<f64>::from_elem((table.len(), items.len()), f64::NAN);
    for (col, item) in items.iter().enumerate() {
        if let Some(cells) = table.column(item.column) {
            for (row, cell) in cells.enumerate() {
                if let Some(value) = cell.and_then(|answer| item.encode(answer)) {
                    values[[row, col]] = value;
                }
            }
        }
    }
    EncodedMatrix {
        items,
        dimensions,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::columns;

    #[test]
    fn absent_columns_are_omitted_and_unmapped_answers_are_nan() {
        let table = SurveyTable::new(
            vec![columns::AWARENESS.to_string(), columns::PURCHASE.to_string()],
            vec![vec!["非常了解", "是"], vec!["听说过", "否"], vec!["完全不了解", ""]],
        );
        let matrix = encode_dimensions(&table);
        assert_eq!(matrix.codes(), vec!["S1", "A1"]);
        let s1 = matrix.column("S1").unwrap();
        assert_eq!(s1[0], 4.0);
        assert!(s1[1].is_nan());
        assert!(matrix.column("A1").unwrap()[2].is_nan());
        assert!(matrix.dimension_codes(Dimension::Communication).is_empty());

        let complete = matrix.complete_cases(&["S1", "A1"]);
        assert_eq!(complete.nrows(), 1);
        assert_eq!(complete.row(0).to_vec(), vec![4.0, 1.0]);
    }
}
