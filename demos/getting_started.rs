use broadgrid::{Config, Extent2, Point2, SpatialHash};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug to see detailed logs)
    env_logger::init();

    println!("=== broadgrid - Getting Started ===\n");

    // Create a grid with 64-unit cells
    let mut grid: SpatialHash<u32> = SpatialHash::new(64.0);
    println!("✓ Created grid with cell size {}\n", grid.cell_size());

    // === POINT MEMBERSHIP ===
    println!("1. Point Membership");
    println!("-------------------");

    grid.insert_point(40, Point2::new(20.0, 20.0))?;
    grid.insert_point(80, Point2::new(100.0, 100.0))?;
    grid.insert_point(100, Point2::new(40.0, 40.0))?;
    println!("   Inserted 3 targets");

    let hits = grid.query_point(Point2::new(10.0, 10.0));
    println!("   Targets sharing the cell of (10, 10): {}", hits.len());
    for id in hits.iter() {
        println!("     - target {}", id);
    }
    println!();

    // === RECTANGULAR FOOTPRINTS ===
    println!("2. Rectangular Footprints");
    println!("-------------------------");

    grid.insert_rect(7, Point2::new(50.0, 50.0), Extent2::new(200.0, 120.0))?;
    println!("   Inserted one target over a 200x120 footprint");

    let hits = grid.query_rect(Point2::new(0.0, 0.0), Extent2::new(128.0, 128.0));
    println!("   Candidates in the 128x128 region: {}", hits.len());

    grid.remove_rect(&7, Point2::new(50.0, 50.0), Extent2::new(200.0, 120.0));
    println!("   Removed the footprint with its insert geometry\n");

    // === LINE QUERIES ===
    println!("3. Line Queries");
    println!("---------------");

    let hits = grid.query_line(Point2::new(0.0, 0.0), Point2::new(300.0, 120.0));
    println!("   Candidates along a diagonal sweep: {}", hits.len());

    let hits = grid.query_line(Point2::new(40.0, 200.0), Point2::new(40.0, -200.0));
    println!("   Candidates along a vertical sweep: {}\n", hits.len());

    // === CONFIGURATION ===
    println!("4. Configuration");
    println!("----------------");

    let config = Config::with_cell_size(32.0).with_max_cells(4096);
    println!("   Config as JSON:\n{}", config.to_json()?);

    let bounded: SpatialHash<u32> = SpatialHash::with_config(config)?;
    println!("   Built a bounded grid with cell size {}\n", bounded.cell_size());

    // === STATISTICS ===
    println!("5. Grid Statistics");
    println!("------------------");

    let stats = grid.stats();
    println!("   Materialized cells: {}", stats.cell_count);
    println!("   Occupied cells:     {}", stats.occupied_cells);
    println!("   Total entries:      {}", stats.total_entries);
    println!("   Avg entries/cell:   {:.2}\n", stats.avg_entries_per_cell);

    println!("=== Getting Started Complete! ===");
    println!("\nNext: Try the 'broad_phase' example for a collision-filtering loop");

    Ok(())
}
