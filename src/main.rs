/// Entry point: load configuration, hand control to the engine.

mod config;
mod domain;
mod engine;
mod scene;
mod ui;

use config::GameConfig;
use engine::Engine;

fn main() {
    let config = GameConfig::load();

    let mut engine = Engine::new(config);
    engine.run();

    println!("Thanks for playing!");
}
