use quadspace::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    // A 1000x1000 world that stops subdividing below 16x16 cells
    let world: SpatialIndex<TrackedObject> = IndexBuilder::new(1000, 1000).cell_size(16).build()?;

    let spawns = [
        ("guard-1", 100, 100),
        ("guard-2", 110, 95),
        ("merchant", 500, 500),
        ("wolf", 130, 120),
        ("dragon", 900, 900),
    ];
    for (id, x, y) in spawns {
        world.insert(Arc::new(TrackedObject::new(id, Position::new(x, y))))?;
    }

    // Who is within 40 units of the first guard?
    let nearby = world.query_within_radius(&Position::new(100, 100), 40.0);
    println!("Within 40 of guard-1: {} objects", nearby.len());

    // The wolf runs off; the world tells the index
    world.update("wolf", Position::new(700, 650))?;

    for neighbor in world.knn(&Position::new(520, 510), 3) {
        println!(
            "{} at {} ({:.1} away)",
            neighbor.object.id, neighbor.position, neighbor.distance
        );
    }

    // Moving off the map is refused and leaves the merchant where it was
    if let Err(err) = world.update("merchant", Position::new(1500, 20)) {
        println!("Rejected move: {}", err);
    }

    world.remove("dragon")?;

    let stats = world.stats();
    println!(
        "{} objects in {} nodes ({} leaves, depth {}, {:.2} per leaf)",
        stats.total_objects,
        stats.total_nodes,
        stats.leaf_nodes,
        stats.max_depth,
        stats.avg_objects_per_leaf
    );

    Ok(())
}
