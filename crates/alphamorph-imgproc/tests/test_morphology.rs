use alphamorph_image::{ImageSize, MaskBuffer};
use alphamorph_imgproc::{
    morphology::{
        self, apply, BorderValue, KernelType, MorphOp, MorphologyError, StructuringElement,
    },
    parallel::ExecutionStrategy,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_mask(rng: &mut StdRng, width: usize, height: usize) -> MaskBuffer<u8> {
    let data = (0..width * height).map(|_| rng.random::<u8>()).collect();
    MaskBuffer::new(ImageSize { width, height }, data).unwrap()
}

/// Blobby mask: random opaque seeds grown a little, closer to a real alpha plane.
fn random_shape(rng: &mut StdRng, width: usize, height: usize) -> MaskBuffer<u8> {
    let data = (0..width * height)
        .map(|_| if rng.random_bool(0.15) { 255 } else { 0 })
        .collect();
    let seeds = MaskBuffer::new(ImageSize { width, height }, data).unwrap();
    morphology::dilate(&seeds, KernelType::Disk, 1, 1).unwrap()
}

/// Pixel-by-pixel evaluation of the footprint definition.
fn reference(src: &MaskBuffer<u8>, element: &StructuringElement, op: MorphOp) -> MaskBuffer<u8> {
    let (w, h) = (src.width() as isize, src.height() as isize);
    let mut dst = src.clone();
    for y in 0..h {
        for x in 0..w {
            let samples = element.offsets().map(|(dx, dy)| {
                let (sx, sy) = (x + dx, y + dy);
                if sx < 0 || sy < 0 || sx >= w || sy >= h {
                    u8::OUT_OF_BOUNDS
                } else {
                    src.get_pixel(sx as usize, sy as usize).unwrap()
                }
            });
            let v = match op {
                MorphOp::Dilate => samples.max(),
                MorphOp::Erode => samples.min(),
            };
            dst.set_pixel(x as usize, y as usize, v.unwrap()).unwrap();
        }
    }
    dst
}

fn assert_le(a: &MaskBuffer<u8>, b: &MaskBuffer<u8>) {
    assert_eq!(a.size(), b.size());
    for (i, (x, y)) in a.as_slice().iter().zip(b.as_slice()).enumerate() {
        assert!(x <= y, "sample {i}: {x} > {y}");
    }
}

#[test]
fn test_matches_reference() -> Result<(), MorphologyError> {
    let mut rng = StdRng::seed_from_u64(7);
    for (width, height) in [(1, 1), (1, 9), (9, 1), (7, 5), (16, 13)] {
        let src = random_mask(&mut rng, width, height);
        for kernel_type in KernelType::ALL {
            for radius in 0..5 {
                let element = StructuringElement::from_radius(kernel_type, radius);
                for op in [MorphOp::Dilate, MorphOp::Erode] {
                    assert_eq!(
                        apply(&src, &element, op)?,
                        reference(&src, &element, op),
                        "{op} {kernel_type} r={radius} on {width}x{height}"
                    );
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_scenario_center_pixel() -> Result<(), MorphologyError> {
    let mut data = vec![0u8; 9];
    data[4] = 255;
    let src = MaskBuffer::new([3, 3].into(), data)?;

    let dilated = morphology::dilate(&src, KernelType::Rect, 1, 1)?;
    assert_eq!(dilated.as_slice(), &[255u8; 9]);

    let eroded = morphology::erode(&src, KernelType::Rect, 1, 1)?;
    assert_eq!(eroded.as_slice(), &[0u8; 9]);
    Ok(())
}

#[test]
fn test_scenario_opaque_disk_erosion() -> Result<(), MorphologyError> {
    let src = MaskBuffer::from_size_val([5, 5].into(), 255u8);
    let eroded = morphology::erode(&src, KernelType::Disk, 1, 1)?;
    for y in 0..5 {
        for x in 0..5 {
            let interior = (1..4).contains(&x) && (1..4).contains(&y);
            let expected = if interior { 255 } else { 0 };
            assert_eq!(eroded.get_pixel(x, y)?, expected, "({x}, {y})");
        }
    }
    Ok(())
}

#[test]
fn test_radius_beyond_mask() -> Result<(), MorphologyError> {
    #[rustfmt::skip]
    let src = MaskBuffer::new([3, 2].into(), vec![
        0,   0, 0,
        0, 128, 0u8,
    ])?;
    let full = MaskBuffer::from_size_val([2, 2].into(), 255u8);

    for radius in [100_000, i32::MAX] {
        for kernel_type in [KernelType::Rect, KernelType::Diamond, KernelType::Disk] {
            let dilated = morphology::dilate(&src, kernel_type, radius, 1)?;
            assert_eq!(dilated.as_slice(), &[128; 6], "{kernel_type} r={radius}");
        }
        let dilated = morphology::dilate(&src, KernelType::Cross, radius, 2)?;
        assert_eq!(dilated.as_slice(), &[128; 6]);
        let dilated = morphology::dilate(&src, KernelType::Cross, radius, 1)?;
        assert_eq!(dilated.as_slice(), &[0, 128, 0, 128, 128, 128]);

        for kernel_type in KernelType::ALL {
            assert_eq!(morphology::dilate(&full, kernel_type, radius, 3)?, full);
            let eroded = morphology::erode(&full, kernel_type, radius, 1)?;
            assert_eq!(eroded.as_slice(), &[0; 4], "{kernel_type} r={radius}");
        }
    }

    // radii just past the mask agree with the per-pixel definition
    let mut rng = StdRng::seed_from_u64(37);
    let src = random_mask(&mut rng, 6, 4);
    for kernel_type in KernelType::ALL {
        for radius in [3, 4, 5, 6, 7, 9] {
            let element = StructuringElement::from_radius(kernel_type, radius);
            for op in [MorphOp::Dilate, MorphOp::Erode] {
                assert_eq!(
                    apply(&src, &element, op)?,
                    reference(&src, &element, op),
                    "{op} {kernel_type} r={radius}"
                );
            }
        }
    }
    Ok(())
}

#[test]
fn test_extensive_and_anti_extensive() -> Result<(), MorphologyError> {
    let mut rng = StdRng::seed_from_u64(11);
    let src = random_mask(&mut rng, 23, 17);
    for kernel_type in KernelType::ALL {
        for radius in 0..4 {
            let dilated = morphology::dilate(&src, kernel_type, radius, 1)?;
            let eroded = morphology::erode(&src, kernel_type, radius, 1)?;
            assert_le(&eroded, &src);
            assert_le(&src, &dilated);
        }
    }
    Ok(())
}

#[test]
fn test_duality_on_interior() -> Result<(), MorphologyError> {
    let mut rng = StdRng::seed_from_u64(13);
    let src = random_mask(&mut rng, 20, 14);
    let strategy = ExecutionStrategy::default();
    for op in [MorphOp::Dilate, MorphOp::Erode] {
        for kernel_type in KernelType::ALL {
            for radius in 1..4 {
                let direct = morphology::filter(&src, op, kernel_type, radius, 1, strategy)?;
                let dual =
                    morphology::filter(&src.inverted(), op.dual(), kernel_type, radius, 1, strategy)?
                        .inverted();
                let r = radius as usize;
                // border pixels see the transparent out-of-bounds value in both passes
                for y in r..src.height() - r {
                    for x in r..src.width() - r {
                        assert_eq!(direct.get_pixel(x, y)?, dual.get_pixel(x, y)?);
                    }
                }
            }
        }
    }
    Ok(())
}

#[test]
fn test_monotonic_in_radius() -> Result<(), MorphologyError> {
    let mut rng = StdRng::seed_from_u64(17);
    let src = random_mask(&mut rng, 19, 19);
    for kernel_type in KernelType::ALL {
        for radius in 0..4 {
            let d1 = morphology::dilate(&src, kernel_type, radius, 1)?;
            let d2 = morphology::dilate(&src, kernel_type, radius + 1, 1)?;
            assert_le(&d1, &d2);

            let e1 = morphology::erode(&src, kernel_type, radius, 1)?;
            let e2 = morphology::erode(&src, kernel_type, radius + 1, 1)?;
            assert_le(&e2, &e1);
        }
    }
    Ok(())
}

#[test]
fn test_rect_and_diamond_compose_exactly() -> Result<(), MorphologyError> {
    let mut rng = StdRng::seed_from_u64(19);
    let src = random_mask(&mut rng, 21, 15);
    for kernel_type in [KernelType::Rect, KernelType::Diamond] {
        for radius in 1..4 {
            assert_eq!(
                morphology::dilate(&src, kernel_type, radius, 2)?,
                morphology::dilate(&src, kernel_type, 2 * radius, 1)?,
                "dilate {kernel_type} r={radius}"
            );
            assert_eq!(
                morphology::erode(&src, kernel_type, radius, 2)?,
                morphology::erode(&src, kernel_type, 2 * radius, 1)?,
                "erode {kernel_type} r={radius}"
            );
        }
    }
    Ok(())
}

#[test]
fn test_identity_at_zero() -> Result<(), MorphologyError> {
    let mut rng = StdRng::seed_from_u64(23);
    let src = random_mask(&mut rng, 8, 6);
    for kernel_type in KernelType::ALL {
        for n in 0..4 {
            assert_eq!(morphology::dilate(&src, kernel_type, 0, n)?, src);
            assert_eq!(morphology::erode(&src, kernel_type, 0, n)?, src);
        }
        for r in 0..4 {
            assert_eq!(morphology::dilate(&src, kernel_type, r, 0)?, src);
            assert_eq!(morphology::erode(&src, kernel_type, r, 0)?, src);
        }
    }
    Ok(())
}

#[test]
fn test_opening_is_idempotent() -> Result<(), MorphologyError> {
    let mut rng = StdRng::seed_from_u64(29);
    for _ in 0..4 {
        let src = random_shape(&mut rng, 24, 18);
        for kernel_type in KernelType::ALL {
            for radius in 1..3 {
                let once = morphology::open(&src, kernel_type, radius, 1)?;
                let twice = morphology::open(&once, kernel_type, radius, 1)?;
                assert_eq!(once, twice, "{kernel_type} r={radius}");
            }
        }
    }

    let src = random_mask(&mut rng, 15, 12);
    let once = morphology::open(&src, KernelType::Disk, 2, 1)?;
    assert_eq!(morphology::open(&once, KernelType::Disk, 2, 1)?, once);
    Ok(())
}

#[test]
fn test_f32_matches_u8() -> Result<(), MorphologyError> {
    let mut rng = StdRng::seed_from_u64(31);
    let src = random_mask(&mut rng, 12, 9);
    for kernel_type in KernelType::ALL {
        let dilated = morphology::dilate(&src, kernel_type, 2, 2)?;
        let dilated_f32 = morphology::dilate(&src.to_f32(), kernel_type, 2, 2)?;
        assert_eq!(dilated_f32.to_u8(), dilated);
    }
    Ok(())
}
