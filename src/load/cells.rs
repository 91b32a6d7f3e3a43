use anyhow::Result;
use arrow::{
    array::Array,
    util::display::{ArrayFormatter, FormatOptions},
};

/// Render every cell as text; nulls stay `None`. Works for plain and
/// dictionary-encoded strings as well as numeric columns.
pub fn text_cells(array: &dyn Array) -> Result<Vec<Option<String>>> {
    let options = FormatOptions::default();
    let formatter = ArrayFormatter::try_new(array, &options)?;
    Ok((0..array.len())
        .map(|i| {
            if array.is_null(i) {
                None
            } else {
                Some(formatter.value(i).to_string())
            }
        })
        .collect())
}
