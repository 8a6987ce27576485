use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    sicas::apps::run_supplementary(std::env::args().skip(1))
}
