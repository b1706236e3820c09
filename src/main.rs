use image::error::ImageError;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use quadtree_bin::QuadTree;
use quadtree_bin::{ascii, load};
use quadtree_bin::error::LoadError;

/// Helper function for `main`.
fn error_exit(msg: &str, code: i32) -> ! {
	eprintln!("{}", msg);
	std::process::exit(code)
}

/// `clap`-based CLI for decomposing binary images into quadtrees.
///
/// May exit process with status code if there are errors:
///
/// 1: `clap` error
///
/// 2: invalid arguments
///
/// 3: file I/O issues
///
/// 4: invalid image data
///
/// 10: other, potentially unknown error
fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_writer(std::io::stderr)
		.init();

	let clap_matches = clap::App::new("quadtree_bin")
		.version(env!("CARGO_PKG_VERSION"))
		.author("vkcz")
		.about("Decomposes a square black and white image into a quadtree.")
		.arg_from_usage("-s, --side=[N] 'Side length of a raw (.raw/.bin) input in pixels; inferred from the file size by default'")
		.arg_from_usage("-l, --level=[N] 'Luma below which pixels of a raster input count as black; defaults to 128'")
		.arg_from_usage("-a, --ascii 'Print the decoded image as ASCII art'")
		.arg_from_usage("-o, --output=[OUTPUT] 'Render the quadtree back into an image file at this path'")
		.arg_from_usage("<INPUT> 'Path to input file'")
		.get_matches();

	let input_path = match clap_matches.value_of("INPUT") {
		Some(p) => p,
		None => error_exit("No image file specified", 2),
	};
	let side_length = match clap_matches.value_of("side").map(str::parse::<usize>) {
		None => None,
		Some(Ok(n)) => Some(n),
		Some(Err(_)) => error_exit("Non-numeric value for side", 2),
	};
	let level = match clap_matches.value_of("level").map(str::parse::<u8>) {
		None => load::DEFAULT_LEVEL,
		Some(Ok(n)) => n,
		Some(Err(_)) => error_exit("Value for level must be between 0 and 255", 2),
	};

	let samples = match load::open(input_path, side_length, level) {
		Ok(s) => s,
		Err(e) => {
			let code = match e {
				LoadError::Io(_) | LoadError::Image(ImageError::IoError(_)) => 3,
				LoadError::TooLarge(_) | LoadError::SideMismatch { .. } => 2,
				_ => 4,
			};
			error_exit(&format!("Image could not be parsed: {}", e), code)
		}
	};
	debug!(side_length = samples.side_length, "loaded samples");

	let tree = match QuadTree::from_pixels(&samples.pixels, samples.side_length) {
		Ok(t) => t,
		Err(e) => error_exit(&format!("Image could not be parsed: {}", e), 4),
	};
	info!(nodes = tree.node_count(), "decomposed image");
	println!(
		"side {}, depth {}, {} nodes, {} leaves",
		tree.side_length(),
		tree.depth(),
		tree.node_count(),
		tree.leaf_count()
	);

	if clap_matches.is_present("ascii") {
		match ascii::render_default(&tree) {
			Ok(art) => print!("{}", art),
			Err(e) => error_exit(&format!("Could not draw quadtree: {}", e), 10),
		}
	}

	if let Some(output_path) = clap_matches.value_of("output") {
		let output = match tree.root().to_image() {
			Ok(img) => img,
			Err(e) => error_exit(&format!("Could not draw quadtree: {}", e), 10),
		};
		match output.save(output_path) {
			Ok(_) => (),
			Err(_) => error_exit("Could not save output", 3),
		}
	}
}
