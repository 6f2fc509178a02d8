use geo::{Bearing, BoundingRect, Distance, Haversine, LineString, Point, Rect};

pub fn segment_length(from: Point<f64>, to: Point<f64>) -> f64 {
    Haversine.distance(from, to)
}

/// Linear interpolation in lat/lng between two points.
pub fn point_along_segment(from: Point<f64>, to: Point<f64>, fraction: f64) -> Point<f64> {
    Point::new(
        from.x() + (to.x() - from.x()) * fraction,
        from.y() + (to.y() - from.y()) * fraction,
    )
}

pub fn polyline_length(shape: &[Point<f64>]) -> f64 {
    shape
        .windows(2)
        .map(|pair| segment_length(pair[0], pair[1]))
        .sum()
}

/// Cuts `shape` to the part between `start` and `end` meters along it. The
/// cut points are interpolated on existing segments and then replaced by the
/// given snapped vertices.
pub fn trim_shape(
    shape: &mut Vec<Point<f64>>,
    start: f64,
    start_vertex: Point<f64>,
    end: f64,
    end_vertex: Point<f64>,
) {
    if shape.len() < 2 {
        return;
    }

    trim_back(shape, end);
    if let Some(last) = shape.last_mut() {
        *last = end_vertex;
    }

    trim_front(shape, start);
    if let Some(first) = shape.first_mut() {
        *first = start_vertex;
    }
}

fn trim_back(shape: &mut Vec<Point<f64>>, distance: f64) {
    let mut along = 0.0;
    for i in 1..shape.len() {
        let segment = segment_length(shape[i - 1], shape[i]);
        if along + segment > distance {
            let cut = point_along_segment(shape[i - 1], shape[i], fraction(distance - along, segment));
            shape.truncate(i);
            shape.push(cut);
            return;
        }
        along += segment;
    }
}

fn trim_front(shape: &mut Vec<Point<f64>>, distance: f64) {
    if distance <= 0.0 {
        return;
    }

    let mut along = 0.0;
    for i in 1..shape.len() {
        let segment = segment_length(shape[i - 1], shape[i]);
        if along + segment > distance {
            let cut = point_along_segment(shape[i - 1], shape[i], fraction(distance - along, segment));
            shape.drain(..i - 1);
            shape[0] = cut;
            return;
        }
        along += segment;
    }

    // Shorter than the cut: collapse on the last point.
    if let Some(&last) = shape.last() {
        shape.clear();
        shape.extend([last, last]);
    }
}

fn fraction(distance: f64, segment: f64) -> f64 {
    if segment > 0.0 {
        (distance / segment).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn point_at_distance(
    mut points: impl Iterator<Item = Point<f64>>,
    distance: f64,
) -> Option<Point<f64>> {
    let mut previous = points.next()?;
    let mut along = 0.0;
    for point in points {
        let segment = segment_length(previous, point);
        if segment > 0.0 && along + segment >= distance {
            return Some(point_along_segment(previous, point, fraction(distance - along, segment)));
        }
        along += segment;
        previous = point;
    }
    Some(previous)
}

fn heading(from: Point<f64>, to: Point<f64>) -> f64 {
    Haversine.bearing(from, to).rem_euclid(360.0)
}

/// Heading from the first point towards the point `offset` meters along.
pub fn heading_along_polyline(shape: &[Point<f64>], offset: f64) -> Option<f64> {
    let first = *shape.first()?;
    let target = point_at_distance(shape.iter().copied(), offset)?;
    Some(heading(first, target))
}

/// Heading into the last point from the point `offset` meters before it.
pub fn heading_at_end_of_polyline(shape: &[Point<f64>], offset: f64) -> Option<f64> {
    let last = *shape.last()?;
    let source = point_at_distance(shape.iter().rev().copied(), offset)?;
    Some(heading(source, last))
}

pub fn bounding_box(shape: &[Point<f64>]) -> Option<Rect<f64>> {
    shape
        .iter()
        .copied()
        .collect::<LineString<f64>>()
        .bounding_rect()
}
