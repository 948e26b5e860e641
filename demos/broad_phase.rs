//! Broad-phase collision filtering over a swarm of moving boxes.
//!
//! Each entity occupies an axis-aligned box. Every frame the grid is
//! repopulated, then each entity queries its own footprint to collect
//! candidates for an exact narrow-phase test.

use broadgrid::{Extent2, Point2, SpatialHash};

const ENTITY_COUNT: usize = 500;
const WORLD_SIZE: f64 = 2000.0;
const BOX_SIZE: f64 = 24.0;
const FRAMES: usize = 60;

struct Entity {
    pos: Point2,
    vel: Point2,
}

fn overlaps(a: &Entity, b: &Entity) -> bool {
    (a.pos.x - b.pos.x).abs() < BOX_SIZE && (a.pos.y - b.pos.y).abs() < BOX_SIZE
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Deterministic pseudo-random placement, no RNG dependency needed.
    let mut entities: Vec<Entity> = (0..ENTITY_COUNT)
        .map(|i| {
            let a = (i as f64) * 0.617;
            Entity {
                pos: Point2::new(
                    (a.sin() * 0.5 + 0.5) * WORLD_SIZE,
                    (a.cos() * 0.5 + 0.5) * WORLD_SIZE,
                ),
                vel: Point2::new((a * 1.3).sin() * 3.0, (a * 2.1).cos() * 3.0),
            }
        })
        .collect();

    let mut grid: SpatialHash<usize> = SpatialHash::new(64.0);
    let extent = Extent2::new(BOX_SIZE, BOX_SIZE);

    let mut candidate_pairs = 0usize;
    let mut confirmed_pairs = 0usize;

    for _ in 0..FRAMES {
        // Integrate and bounce off the world bounds.
        for e in &mut entities {
            e.pos.x += e.vel.x;
            e.pos.y += e.vel.y;
            if e.pos.x < 0.0 || e.pos.x > WORLD_SIZE {
                e.vel.x = -e.vel.x;
            }
            if e.pos.y < 0.0 || e.pos.y > WORLD_SIZE {
                e.vel.y = -e.vel.y;
            }
        }

        // Rebuild the index for this frame.
        grid.clear();
        for (i, e) in entities.iter().enumerate() {
            grid.insert_rect(i, e.pos, extent)?;
        }

        // Broad phase: each entity collects candidates from its footprint,
        // narrow phase confirms with an exact overlap test.
        for i in 0..entities.len() {
            let candidates = grid.query_rect(entities[i].pos, extent).to_vec();
            for &j in &candidates {
                if j <= i {
                    continue;
                }
                candidate_pairs += 1;
                if overlaps(&entities[i], &entities[j]) {
                    confirmed_pairs += 1;
                }
            }
        }
    }

    let naive_pairs = FRAMES * ENTITY_COUNT * (ENTITY_COUNT - 1) / 2;
    println!("Simulated {} entities for {} frames", ENTITY_COUNT, FRAMES);
    println!("Naive pair tests:     {}", naive_pairs);
    println!("Broad-phase pairs:    {}", candidate_pairs);
    println!("Confirmed collisions: {}", confirmed_pairs);
    println!("Grid cells in use:    {}", grid.cell_count());

    Ok(())
}
