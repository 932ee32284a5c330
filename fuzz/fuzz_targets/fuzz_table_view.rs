//! Fuzz target for the table view state machine.
//!
//! Arbitrary rows and a sequence of sort/page operations must keep the page
//! within bounds and the row count unchanged.

#![no_main]

use arbitrary::Arbitrary;
use dr_common::{ColumnType, Row, TableColumn, TableSpec};
use dr_table::TableView;
use libfuzzer_sys::fuzz_target;
use serde_json::json;

#[derive(Debug, Arbitrary)]
enum Cell {
    Missing,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

#[derive(Debug, Arbitrary)]
enum Op {
    Sort(u8),
    Next,
    Previous,
}

#[derive(Debug, Arbitrary)]
struct Input {
    rows: Vec<(Cell, Cell)>,
    page_size: u8,
    paginated: bool,
    ops: Vec<Op>,
}

fn insert(row: &mut Row, key: &str, cell: Cell) {
    let value = match cell {
        Cell::Missing => return,
        Cell::Null => serde_json::Value::Null,
        Cell::Bool(b) => json!(b),
        Cell::Int(i) => json!(i),
        Cell::Float(f) => json!(f),
        Cell::Text(s) => json!(s),
    };
    row.insert(key.to_string(), value);
}

fuzz_target!(|input: Input| {
    let mut spec = TableSpec::new("fuzz", "Fuzz")
        .with_column(TableColumn::new("a", "A").sortable())
        .with_column(TableColumn::new("b", "B").with_type(ColumnType::Number).sortable());
    for (a, b) in input.rows {
        let mut row = Row::new();
        insert(&mut row, "a", a);
        insert(&mut row, "b", b);
        spec = spec.with_row(row);
    }
    spec.show_pagination = input.paginated;
    spec.page_size = Some(input.page_size as usize);

    let count = spec.data.len();
    let mut view = TableView::new(&spec);
    for op in input.ops {
        match op {
            Op::Sort(k) => view.sort(["a", "b", "missing"][(k % 3) as usize]),
            Op::Next => view.next_page(),
            Op::Previous => view.previous_page(),
        }
        assert!(view.current_page() >= 1 && view.current_page() <= view.total_pages());
        assert_eq!(view.row_count(), count);
        let _ = view.formatted_page();
    }
});
