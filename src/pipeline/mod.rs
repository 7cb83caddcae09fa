pub mod stage1_select;
pub mod stage2_aggregate;
pub mod stage3_report;
