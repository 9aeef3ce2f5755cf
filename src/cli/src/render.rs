use cube_core::{Axis, AxisDirection, Color, FaceletId, FaceletLedger, PositionCode};
use itertools::Itertools;
use owo_colors::OwoColorize;

/// Where each face lands in the unfolded cross, in units of whole faces.
const LAYOUT: [(AxisDirection, usize, usize); 6] = [
    (AxisDirection::YPos, 0, 1),
    (AxisDirection::XNeg, 1, 0),
    (AxisDirection::ZPos, 1, 1),
    (AxisDirection::XPos, 1, 2),
    (AxisDirection::ZNeg, 1, 3),
    (AxisDirection::YNeg, 2, 1),
];

const DOWN: [i32; 3] = [1, 0, -1];
const UP: [i32; 3] = [-1, 0, 1];

/// The axes running down the rows and along the columns of `face` when
/// the cube is unfolded around Z+, with the offsets in reading order.
fn orientation(face: AxisDirection) -> ((Axis, [i32; 3]), (Axis, [i32; 3])) {
    match face {
        AxisDirection::YPos => ((Axis::Z, UP), (Axis::X, UP)),
        AxisDirection::YNeg => ((Axis::Z, DOWN), (Axis::X, UP)),
        AxisDirection::ZPos | AxisDirection::Center => ((Axis::Y, DOWN), (Axis::X, UP)),
        AxisDirection::ZNeg => ((Axis::Y, DOWN), (Axis::X, DOWN)),
        AxisDirection::XPos => ((Axis::Y, DOWN), (Axis::Z, DOWN)),
        AxisDirection::XNeg => ((Axis::Y, DOWN), (Axis::Z, UP)),
    }
}

fn sticker(color: Color, plain: bool) -> String {
    if plain {
        format!("{} ", color.letter())
    } else {
        "██".truecolor(color.r, color.g, color.b).to_string()
    }
}

/// Draws the cube as a cross shaped net.
pub fn net(ledger: &FaceletLedger, plain: bool) -> String {
    let mut grid = [[None; 12]; 9];
    for (face, face_row, face_column) in LAYOUT {
        let ((row_axis, rows), (column_axis, columns)) = orientation(face);
        for (r, row) in rows.into_iter().enumerate() {
            for (c, column) in columns.into_iter().enumerate() {
                let position = PositionCode::encode([
                    AxisDirection::from_axis_sign(row_axis, row),
                    AxisDirection::from_axis_sign(column_axis, column),
                ]);
                grid[face_row * 3 + r][face_column * 3 + c] =
                    FaceletId::new(face, position).map(|id| ledger.color(id));
            }
        }
    }

    grid.iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.map_or_else(|| "  ".to_owned(), |color| sticker(color, plain)))
                .join("")
                .trim_end()
                .to_owned()
        })
        .join("\n")
}
