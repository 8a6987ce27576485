use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    sicas::apps::run_funnel(std::env::args().skip(1))
}
