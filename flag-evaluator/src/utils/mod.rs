pub mod snapshot_cell;
