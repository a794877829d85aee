pub mod cells;
pub mod matchup_table;
