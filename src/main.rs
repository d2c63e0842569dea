use affine2d::AppConfig;

fn print_usage() {
    println!("Press and hold RIGHT to TRANSLATE the square");
    println!("Press and hold DOWN  to ROTATE the square");
    println!("Press and hold LEFT  to SCALE the square");
    println!("Press and hold UP    to SHEAR the square");
    println!("Press ESC to quit");
    println!("---------------------------------------------------------");
    println!("BLUE = translated, RED = rotated, GREEN = scaled, PURPLE = sheared");
}

fn main() {
    affine2d::logging::init();
    print_usage();

    let config = AppConfig::new()
        .title("Linear Transformations")
        .size(950, 950);

    if let Err(error) = affine2d::run(config) {
        log::error!("{error}");
        std::process::exit(1);
    }
}
