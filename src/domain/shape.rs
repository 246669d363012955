/// Human-readable polygon name for a vertex count.
///
/// Advisory wizard feedback only; containment never looks at this. Named
/// shapes cover 3 through 12 vertices, anything larger falls back to the
/// generic "<n>-gon" form. Counts below 3 describe the in-progress sketch.
pub fn shape_label(count: usize) -> String {
    let name = match count {
        0 => "Empty",
        1 => "Point",
        2 => "Line",
        3 => "Triangle",
        4 => "Quadrilateral",
        5 => "Pentagon",
        6 => "Hexagon",
        7 => "Heptagon",
        8 => "Octagon",
        9 => "Nonagon",
        10 => "Decagon",
        11 => "Hendecagon",
        12 => "Dodecagon",
        n => return format!("{}-gon", n),
    };
    name.to_string()
}
