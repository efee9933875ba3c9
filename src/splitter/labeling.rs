use image::{GrayImage, ImageBuffer, Luma};
use imageproc::point::Point;
use imageproc::rect::Rect;

/// Per-pixel component labels; 0 is background, 1..=N are objects.
pub type LabelMap = ImageBuffer<Luma<u32>, Vec<u32>>;

/// Neighborhood used to decide whether two foreground pixels touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// Edge-adjacent neighbors only.
    Four,
    /// Edge- and corner-adjacent neighbors.
    #[default]
    Eight,
}

impl Connectivity {
    // Offsets of the neighbors already visited in row-major scan order.
    fn scanned_offsets(self) -> &'static [(i64, i64)] {
        match self {
            Connectivity::Four => &[(-1, 0), (0, -1)],
            Connectivity::Eight => &[(-1, 0), (-1, -1), (0, -1), (1, -1)],
        }
    }
}

/// Accumulated geometry of one labeled component.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionStats {
    pub label: u32,
    pub area: u32,
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
    sum_x: u64,
    sum_y: u64,
}

impl RegionStats {
    fn new(label: u32, x: u32, y: u32) -> Self {
        Self {
            label,
            area: 1,
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
            sum_x: u64::from(x),
            sum_y: u64::from(y),
        }
    }

    fn record(&mut self, x: u32, y: u32) {
        self.area += 1;
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        self.sum_x += u64::from(x);
        self.sum_y += u64::from(y);
    }

    /// Smallest rectangle containing every pixel of the component.
    pub fn bounding_box(&self) -> Rect {
        Rect::at(self.min_x as i32, self.min_y as i32)
            .of_size(self.max_x - self.min_x + 1, self.max_y - self.min_y + 1)
    }

    /// Mean position of the component's pixels.
    pub fn centroid(&self) -> Point<f64> {
        Point::new(
            self.sum_x as f64 / f64::from(self.area),
            self.sum_y as f64 / f64::from(self.area),
        )
    }
}

// Disjoint sets over provisional labels. Unions keep the smallest label of
// a set as its root, so a root is always the first label of its component
// encountered in scan order.
struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        // Index 0 stands for background and never joins a set.
        Self { parent: vec![0] }
    }

    fn len(&self) -> usize {
        self.parent.len()
    }

    fn make_label(&mut self) -> u32 {
        let label = self.parent.len() as u32;
        self.parent.push(label);
        label
    }

    fn find(&mut self, mut label: u32) -> u32 {
        // Path halving keeps the trees shallow without a second sweep.
        while self.parent[label as usize] != label {
            let grandparent = self.parent[self.parent[label as usize] as usize];
            self.parent[label as usize] = grandparent;
            label = grandparent;
        }
        label
    }

    fn union(&mut self, a: u32, b: u32) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a < root_b {
            self.parent[root_b as usize] = root_a;
        } else {
            self.parent[root_a as usize] = root_b;
        }
    }
}

/// Label the connected components of a binary mask.
///
/// Classic two-pass labeling: the first pass assigns provisional labels
/// from the already-visited neighbors, unioning them whenever two labeled
/// runs turn out to touch; the second pass rewrites provisional labels to
/// compact ids and accumulates per-component statistics. Ids are 1..=N
/// with no gaps, numbered by first appearance in row-major scan order, so
/// the same mask always produces the same map. Nonzero mask cells count
/// as foreground.
pub fn label_components(
    mask: &GrayImage,
    connectivity: Connectivity,
) -> (LabelMap, Vec<RegionStats>) {
    let (width, height) = mask.dimensions();
    let row = width as usize;
    let pixels = mask.as_raw();
    let mut labels = vec![0u32; row * height as usize];
    let mut sets = UnionFind::new();

    // Pass 1: provisional labels from the west and north neighbors.
    for y in 0..height {
        for x in 0..width {
            let index = y as usize * row + x as usize;
            if pixels[index] == 0 {
                continue;
            }
            let mut assigned = 0;
            for &(dx, dy) in connectivity.scanned_offsets() {
                let nx = i64::from(x) + dx;
                let ny = i64::from(y) + dy;
                if nx < 0 || ny < 0 || nx >= i64::from(width) {
                    continue;
                }
                let neighbor = labels[ny as usize * row + nx as usize];
                if neighbor == 0 {
                    continue;
                }
                if assigned == 0 {
                    assigned = neighbor;
                } else if neighbor != assigned {
                    sets.union(assigned, neighbor);
                }
            }
            if assigned == 0 {
                assigned = sets.make_label();
            }
            labels[index] = assigned;
        }
    }

    // Roots are the smallest provisional label of their set, so numbering
    // them in ascending order yields first-appearance ids.
    let mut remap = vec![0u32; sets.len()];
    let mut next = 0;
    for label in 1..sets.len() as u32 {
        let root = sets.find(label);
        if remap[root as usize] == 0 {
            next += 1;
            remap[root as usize] = next;
        }
        remap[label as usize] = remap[root as usize];
    }

    // Pass 2: rewrite to compact ids and collect statistics.
    let mut stats: Vec<RegionStats> = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let index = y as usize * row + x as usize;
            if labels[index] == 0 {
                continue;
            }
            let id = remap[labels[index] as usize];
            labels[index] = id;
            match stats.get_mut(id as usize - 1) {
                Some(entry) => entry.record(x, y),
                None => stats.push(RegionStats::new(id, x, y)),
            }
        }
    }

    let label_map = LabelMap::from_raw(width, height, labels).unwrap();
    (label_map, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from_rows(rows: &[&str]) -> GrayImage {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        GrayImage::from_fn(width, height, |x, y| {
            match rows[y as usize].as_bytes()[x as usize] {
                b'X' => Luma([255]),
                _ => Luma([0]),
            }
        })
    }

    #[test]
    fn empty_mask_yields_no_components() {
        let mask = GrayImage::new(4, 3);
        let (map, stats) = label_components(&mask, Connectivity::Eight);
        assert!(stats.is_empty());
        assert!(map.as_raw().iter().all(|&label| label == 0));
    }

    #[test]
    fn single_pixel_component() {
        let mask = mask_from_rows(&["...", ".X.", "..."]);
        let (map, stats) = label_components(&mask, Connectivity::Eight);
        assert_eq!(map.get_pixel(1, 1).0[0], 1);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].label, 1);
        assert_eq!(stats[0].area, 1);
        assert_eq!(stats[0].bounding_box(), Rect::at(1, 1).of_size(1, 1));
        assert_eq!(stats[0].centroid(), Point::new(1.0, 1.0));
    }

    #[test]
    fn diagonal_pixels_merge_under_eight_but_not_four() {
        let mask = mask_from_rows(&["X.", ".X"]);
        let (_, eight) = label_components(&mask, Connectivity::Eight);
        assert_eq!(eight.len(), 1);
        assert_eq!(eight[0].area, 2);

        let (map, four) = label_components(&mask, Connectivity::Four);
        assert_eq!(four.len(), 2);
        assert_eq!(map.get_pixel(0, 0).0[0], 1);
        assert_eq!(map.get_pixel(1, 1).0[0], 2);
    }

    #[test]
    fn arms_meeting_later_collapse_into_one_component() {
        let mask = mask_from_rows(&["X.X", "X.X", "XXX"]);
        let (map, stats) = label_components(&mask, Connectivity::Four);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].area, 7);
        assert_eq!(stats[0].bounding_box(), Rect::at(0, 0).of_size(3, 3));
        assert!(map.as_raw().iter().all(|&label| label <= 1));
    }

    #[test]
    fn checkerboard_is_one_component_under_eight() {
        let mask = GrayImage::from_fn(4, 4, |x, y| {
            if (x + y) % 2 == 0 { Luma([255]) } else { Luma([0]) }
        });
        let (_, eight) = label_components(&mask, Connectivity::Eight);
        assert_eq!(eight.len(), 1);
        assert_eq!(eight[0].area, 8);

        let (_, four) = label_components(&mask, Connectivity::Four);
        assert_eq!(four.len(), 8);
        assert!(four.iter().all(|stats| stats.area == 1));
    }

    #[test]
    fn plus_shape_statistics() {
        let mask = mask_from_rows(&[".....", "..X..", ".XXX.", "..X..", "....."]);
        let (_, stats) = label_components(&mask, Connectivity::Four);
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].area, 5);
        assert_eq!(stats[0].bounding_box(), Rect::at(1, 1).of_size(3, 3));
        assert_eq!(stats[0].centroid(), Point::new(2.0, 2.0));
    }

    #[test]
    fn merged_labels_stay_compact_and_scan_ordered() {
        // The two top runs get separate provisional labels before the
        // second row joins them; the lone pixel must still come out as 2.
        let mask = mask_from_rows(&["X.X..", "XXX..", "....X"]);
        let (map, stats) = label_components(&mask, Connectivity::Eight);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].label, 1);
        assert_eq!(stats[0].area, 5);
        assert_eq!(stats[1].label, 2);
        assert_eq!(stats[1].area, 1);
        assert_eq!(map.get_pixel(2, 0).0[0], 1);
        assert_eq!(map.get_pixel(4, 2).0[0], 2);
    }

    #[test]
    fn default_connectivity_is_eight() {
        assert_eq!(Connectivity::default(), Connectivity::Eight);
    }
}
