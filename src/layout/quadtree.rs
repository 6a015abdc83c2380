use eframe::egui::{Vec2, vec2};

const LEAF_CAPACITY: usize = 8;
const MAX_DEPTH: usize = 12;

pub(super) const THETA: f32 = 0.8;

#[derive(Clone, Copy)]
struct Square {
    center: Vec2,
    half_extent: f32,
}

impl Square {
    fn enclosing(points: &[Vec2]) -> Option<Self> {
        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for point in points {
            min = min.min(*point);
            max = max.max(*point);
        }

        if !(min.x.is_finite() && min.y.is_finite() && max.x.is_finite() && max.y.is_finite()) {
            return None;
        }

        let span = (max - min).max_elem().max(1.0);
        Some(Self {
            center: (min + max) * 0.5,
            half_extent: span * 0.5 + 1.0,
        })
    }

    fn contains(self, point: Vec2) -> bool {
        let offset = (point - self.center).abs();
        offset.x <= self.half_extent && offset.y <= self.half_extent
    }

    fn quadrant(self, point: Vec2) -> usize {
        usize::from(point.x >= self.center.x) | (usize::from(point.y >= self.center.y) << 1)
    }

    fn child(self, quadrant: usize) -> Self {
        let quarter = self.half_extent * 0.5;
        let sign_x = if quadrant & 1 == 1 { 1.0 } else { -1.0 };
        let sign_y = if quadrant & 2 == 2 { 1.0 } else { -1.0 };
        Self {
            center: self.center + vec2(sign_x * quarter, sign_y * quarter),
            half_extent: quarter,
        }
    }
}

pub(super) struct QuadTree {
    square: Square,
    center_of_mass: Vec2,
    mass: f32,
    members: Vec<usize>,
    children: [Option<Box<QuadTree>>; 4],
}

impl QuadTree {
    pub(super) fn build(positions: &[Vec2]) -> Option<Self> {
        let square = Square::enclosing(positions)?;
        Some(Self::subdivide(square, (0..positions.len()).collect(), positions, 0))
    }

    fn subdivide(square: Square, members: Vec<usize>, positions: &[Vec2], depth: usize) -> Self {
        let mass = members.len() as f32;
        let center_of_mass = if members.is_empty() {
            square.center
        } else {
            members.iter().fold(Vec2::ZERO, |sum, &index| sum + positions[index]) / mass
        };

        let mut tree = Self {
            square,
            center_of_mass,
            mass,
            members,
            children: std::array::from_fn(|_| None),
        };

        if depth >= MAX_DEPTH || tree.members.len() <= LEAF_CAPACITY {
            return tree;
        }

        let mut buckets: [Vec<usize>; 4] = std::array::from_fn(|_| Vec::new());
        for &index in &tree.members {
            buckets[square.quadrant(positions[index])].push(index);
        }

        // Coincident points would never split; keep them in one leaf.
        if buckets.iter().filter(|bucket| !bucket.is_empty()).count() <= 1 {
            return tree;
        }

        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if !bucket.is_empty() {
                tree.children[quadrant] = Some(Box::new(Self::subdivide(
                    square.child(quadrant),
                    bucket,
                    positions,
                    depth + 1,
                )));
            }
        }
        tree.members.clear();
        tree
    }

    fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    pub(super) fn accumulate_repulsion(
        &self,
        index: usize,
        positions: &[Vec2],
        strength: f32,
        force: &mut Vec2,
    ) {
        if self.mass <= 0.0 {
            return;
        }

        let point = positions[index];
        if self.is_leaf() {
            for &other in &self.members {
                if other != index {
                    *force += super::repulsion(point, positions[other], strength);
                }
            }
            return;
        }

        let delta = point - self.center_of_mass;
        let distance = delta.length().max(0.01);
        let far_enough = !self.square.contains(point)
            && (self.square.half_extent * 2.0) / distance < THETA;
        if far_enough {
            *force += delta / distance * (strength * self.mass / distance);
            return;
        }

        for child in self.children.iter().flatten() {
            child.accumulate_repulsion(index, positions, strength, force);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_tree() {
        assert!(QuadTree::build(&[]).is_none());
    }

    #[test]
    fn mass_covers_every_point() {
        let positions = (0..50)
            .map(|index| vec2((index % 7) as f32 * 13.0, (index / 7) as f32 * 11.0))
            .collect::<Vec<_>>();
        let tree = QuadTree::build(&positions).expect("non-empty tree");
        assert_eq!(tree.mass, 50.0);
        assert!(!tree.is_leaf());
    }

    #[test]
    fn approximation_pushes_away_from_a_distant_cluster() {
        let mut positions = (0..40)
            .map(|index| vec2(1000.0 + (index % 5) as f32, (index / 5) as f32))
            .collect::<Vec<_>>();
        positions.push(vec2(0.0, 0.0));
        let probe = positions.len() - 1;

        let tree = QuadTree::build(&positions).expect("non-empty tree");
        let mut force = Vec2::ZERO;
        tree.accumulate_repulsion(probe, &positions, 100.0, &mut force);

        assert!(force.x < 0.0);
    }
}
