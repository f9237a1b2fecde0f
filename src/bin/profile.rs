use std::path::Path;

use amaze::app::{App, init_tracing};

fn main() -> std::io::Result<()> {
    let _guard = init_tracing(Path::new("amaze-profile.log"), tracing::Level::INFO);
    let app = App::default();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args.next().and_then(|s| s.parse::<usize>().ok());
    let size = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(255);

    for (generator, elapsed) in app.profile(size, size, num_iters)? {
        println!("{:<24}{:?}", generator.name(), elapsed);
    }
    Ok(())
}
