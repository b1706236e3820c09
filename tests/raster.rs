use quadtree_bin::node::image::{BLACK_LUMA, WHITE_LUMA};
use quadtree_bin::load::{self, Samples};
use quadtree_bin::{Color, QuadTree, Quadrant};

fn temp_path(name: &str) -> std::path::PathBuf {
	std::env::temp_dir().join(format!("quadtree_bin_{}_{}", std::process::id(), name))
}

#[test]
fn raster_round_trip() {
	let pixels = [
		false, false, true, false,
		false, false, false, true,
		true, true, true, true,
		false, false, true, true,
	];
	let tree = QuadTree::from_pixels(&pixels, 4).unwrap();
	let img = tree.root().to_image().unwrap();
	assert_eq!(img.dimensions(), (4, 4));
	for (i, &sample) in pixels.iter().enumerate() {
		let luma = img.get_pixel((i % 4) as u32, (i / 4) as u32).0[0];
		assert_eq!(luma, if sample { BLACK_LUMA } else { WHITE_LUMA });
	}
	assert_eq!(QuadTree::from_image(&img, load::DEFAULT_LEVEL).unwrap(), tree);
}

#[test]
fn opens_raw_files() {
	let path = temp_path("checker.raw");
	// 4x4, upper half white, lower left black, lower right white
	std::fs::write(&path, [0b0000_0000, 0b1100_1100]).unwrap();
	let samples = load::open(&path, None, load::DEFAULT_LEVEL).unwrap();
	std::fs::remove_file(&path).unwrap();
	assert_eq!(samples.side_length, 4);

	let tree = QuadTree::from_pixels(&samples.pixels, samples.side_length).unwrap();
	let root = tree.root();
	assert_eq!(root.child(Quadrant::Q1).unwrap().color(), Color::White);
	assert_eq!(root.child(Quadrant::Q2).unwrap().color(), Color::White);
	assert_eq!(root.child(Quadrant::Q3).unwrap().color(), Color::Black);
	assert_eq!(root.child(Quadrant::Q4).unwrap().color(), Color::White);
	assert_eq!(tree.leaf_count(), 4);
}

#[test]
fn raw_side_length_can_be_given() {
	let path = temp_path("single.bin");
	std::fs::write(&path, [0b1000_0000]).unwrap();
	let samples = load::open(&path, Some(1), load::DEFAULT_LEVEL).unwrap();
	std::fs::remove_file(&path).unwrap();
	assert_eq!(samples, Samples { pixels: vec![true], side_length: 1 });
}

#[test]
fn opens_png_files() {
	let path = temp_path("half.png");
	let img = image::GrayImage::from_fn(8, 8, |x, _| image::Luma([if x < 4 { 0 } else { 255 }]));
	img.save(&path).unwrap();
	let samples = load::open(&path, None, load::DEFAULT_LEVEL).unwrap();
	std::fs::remove_file(&path).unwrap();

	let tree = QuadTree::from_pixels(&samples.pixels, samples.side_length).unwrap();
	assert_eq!(tree.depth(), 1);
	assert_eq!(tree.root().child(Quadrant::Q2).unwrap().color(), Color::Black);
	assert_eq!(tree.root().child(Quadrant::Q1).unwrap().color(), Color::White);
}

#[test]
fn side_length_must_match_png() {
	let path = temp_path("sized.png");
	image::GrayImage::new(4, 4).save(&path).unwrap();
	let wrong = load::open(&path, Some(8), load::DEFAULT_LEVEL);
	let right = load::open(&path, Some(4), load::DEFAULT_LEVEL);
	std::fs::remove_file(&path).unwrap();
	assert!(matches!(
		wrong,
		Err(quadtree_bin::error::LoadError::SideMismatch { given: 8, actual: 4 })
	));
	assert_eq!(right.unwrap().side_length, 4);
}

#[test]
fn missing_file_is_an_io_error() {
	let err = load::open(temp_path("missing.raw"), None, load::DEFAULT_LEVEL).unwrap_err();
	assert!(matches!(err, quadtree_bin::error::LoadError::Io(_)));
}
