//! Arrow layout of the tag table

use crate::error::Result;
use crate::types::Tag;
use arrow::array::{ArrayRef, BooleanArray, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

/// Column names, in output order
pub const TAG_COLUMNS: [&str; 5] = [
    "has_synonyms",
    "is_moderator_only",
    "is_required",
    "count",
    "name",
];

/// Schema shared by every tag batch
pub fn tag_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(TAG_COLUMNS[0], DataType::Boolean, false),
        Field::new(TAG_COLUMNS[1], DataType::Boolean, false),
        Field::new(TAG_COLUMNS[2], DataType::Boolean, false),
        Field::new(TAG_COLUMNS[3], DataType::UInt64, false),
        Field::new(TAG_COLUMNS[4], DataType::Utf8, false),
    ]))
}

/// Convert tags to an Arrow RecordBatch, one row per tag in input order
pub fn tags_to_batch(tags: &[Tag]) -> Result<RecordBatch> {
    let schema = tag_schema();

    if tags.is_empty() {
        return Ok(RecordBatch::new_empty(schema));
    }

    let flag = |f: fn(&Tag) -> bool| -> ArrayRef {
        Arc::new(BooleanArray::from(tags.iter().map(f).collect::<Vec<_>>()))
    };

    let columns: Vec<ArrayRef> = vec![
        flag(|t| t.has_synonyms),
        flag(|t| t.is_moderator_only),
        flag(|t| t.is_required),
        Arc::new(UInt64Array::from_iter_values(tags.iter().map(|t| t.count))),
        Arc::new(StringArray::from_iter_values(
            tags.iter().map(|t| t.name.as_str()),
        )),
    ];

    Ok(RecordBatch::try_new(schema, columns)?)
}
