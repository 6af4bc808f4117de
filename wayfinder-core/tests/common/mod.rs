use wayfinder_core::{StreetMap, VertexId};

/// Builds a `rows` x `cols` lattice of street vertices spaced `step` degrees
/// apart, joined by horizontal and vertical ways.
///
/// Vertex ids are `row * cols + col + 1`, so id 1 sits at the south-west
/// corner.
#[must_use]
pub fn lattice(rows: u64, cols: u64, step: f64) -> StreetMap {
    let mut map = StreetMap::new();
    for row in 0..rows {
        for col in 0..cols {
            map.add_node(id(cols, row, col), coord(col, step), coord(row, step))
                .expect("lattice vertex must be added");
        }
    }
    for row in 0..rows {
        let way: Vec<VertexId> = (0..cols).map(|col| id(cols, row, col)).collect();
        map.add_way(&way).expect("row way must be added");
    }
    for col in 0..cols {
        let way: Vec<VertexId> = (0..rows).map(|row| id(cols, row, col)).collect();
        map.add_way(&way).expect("column way must be added");
    }
    map
}

#[must_use]
pub const fn id(cols: u64, row: u64, col: u64) -> VertexId {
    row * cols + col + 1
}

fn coord(index: u64, step: f64) -> f64 {
    f64::from(u32::try_from(index).expect("lattice index fits in u32")) * step
}
