use crate::input::InputRecord;
use crate::model::methods::Method;
use crate::model::thresholds::MethodTable;

#[derive(Debug, Clone)]
pub struct Stage1Output {
    pub methods: Vec<Method>,
}

pub fn run_stage1(records: &[InputRecord], table: &MethodTable) -> Stage1Output {
    let mut methods = Vec::with_capacity(records.len());
    for record in records {
        let method = table.select(record.complexity);
        if record.complexity.is_nan() {
            tracing::warn!(
                id = %record.id,
                "complexity is NaN; falling back to {}",
                method
            );
        }
        methods.push(method);
    }
    Stage1Output { methods }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_select.rs"]
mod tests;
