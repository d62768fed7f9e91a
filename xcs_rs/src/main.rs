//! Demonstration program for the `xcs` component registry.

use std::error::Error;
use std::fmt::Debug;

use log::LevelFilter;

use xcs_ecs::config::{ENGINE_NAME, ENGINE_VERSION};
use xcs_ecs::{component, register, registered, Component, Config, Universe};

mod logger;

const APP_NAME: &str = env!("CARGO_CRATE_NAME", "binary must be compiled by Cargo");

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Position {
    x: i32,
    y: i32,
}
component!(Position, "Position");

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Velocity {
    dx: i32,
    dy: i32,
}
component!(Velocity, "Velocity");

fn print_storage<T>(universe: &Universe)
where
    T: Component + Debug,
{
    print!("{}:", T::NAME);
    if let Some(storage) = universe.storage::<T>() {
        for (entity, component) in storage {
            print!(" {} => {:?};", entity.id(), component);
        }
    }
    println!();
}

/// Entry point of the demonstration program
fn main() -> Result<(), Box<dyn Error>> {
    let _handle = logger::init(LevelFilter::Debug)?;
    log::info!("{} uses {} v{}", APP_NAME, ENGINE_NAME, *ENGINE_VERSION);

    register::<Position>();
    register::<Velocity>();

    println!("Components registered:");
    for meta in registered() {
        println!("{}", meta);
    }

    let mut universe = Universe::with_config(Config::new(APP_NAME.to_string(), 16));

    let e1 = universe.create_entity();
    *universe.add_component::<Position>(e1).ok_or("entity must be alive")? = Position { x: 0, y: 0 };
    *universe.add_component::<Velocity>(e1).ok_or("entity must be alive")? = Velocity { dx: 1, dy: 1 };
    let e2 = universe.create_entity();
    *universe.add_component::<Position>(e2).ok_or("entity must be alive")? = Position { x: 5, y: 5 };

    print_storage::<Position>(&universe);
    print_storage::<Velocity>(&universe);

    universe.remove_component::<Position>(e1);
    println!("after removing {} of {}:", Position::NAME, e1.id());
    print_storage::<Position>(&universe);
    print_storage::<Velocity>(&universe);

    universe.destroy_entity(e2);
    println!("after destroying {}:", e2.id());
    print_storage::<Position>(&universe);
    print_storage::<Velocity>(&universe);

    log::debug!("final state: {:?}", universe);
    Ok(())
}
