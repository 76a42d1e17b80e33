//! End-to-end sampling tests for vfx-resample.

use approx::assert_abs_diff_eq;
use vfx_resample::border::{BorderPolicy, EdgeBorders};
use vfx_resample::{
    Access, Backend, BufferView, DataType, Edges, Filter, Region, Resampler, TextureView,
    VariantId, VariantTable,
};

fn ramp4() -> Vec<f32> {
    (0..16).map(|v| v as f32).collect()
}

#[test]
fn test_clamp_ramp() {
    let data = ramp4();
    let buf = BufferView::new(&data, 4, 4, 4).unwrap();
    let region = Region::full(4, 4).unwrap();
    let table = VariantTable::full();

    let sampler = table
        .lookup("interpolate_linear_clamp_tblr_f32_buf")
        .unwrap()
        .bind(Access::new(&buf, region).unwrap())
        .unwrap();

    let inside = sampler.sample(0.5, 0.5);
    assert_eq!(inside, 0.0);
    assert_eq!(sampler.sample(-1.0, 0.5), inside);
}

#[test]
fn test_constant_left_ramp() {
    let data = ramp4();
    let buf = BufferView::new(&data, 4, 4, 4).unwrap();
    let region = Region::full(4, 4).unwrap();
    let table = VariantTable::full();

    let sampler = table
        .lookup("interpolate_linear_const_l_f32_buf")
        .unwrap()
        .bind(Access::with_fallback(&buf, region, -1.0).unwrap())
        .unwrap();

    assert_eq!(sampler.sample(-1.0, 0.5), -1.0);
    // Halfway between the fallback column and pixel 0
    assert_eq!(sampler.sample(0.0, 0.5), -0.5);
    assert_eq!(sampler.sample(2.5, 1.5), 6.0);
}

#[test]
fn test_constant_left_ramp_texture() {
    let texels: Vec<[f32; 4]> = ramp4().into_iter().map(|v| [v, 0.0, 0.0, 1.0]).collect();
    let tex = TextureView::new(&texels, 4, 4).unwrap();
    let region = Region::full(4, 4).unwrap();
    let table = VariantTable::full();

    let sampler = table
        .lookup("interpolate_linear_const_l_f32_tex")
        .unwrap()
        .bind(Access::with_fallback(&tex, region, -1.0).unwrap())
        .unwrap();

    assert_eq!(sampler.sample(-1.0, 0.5), -1.0);
}

#[test]
fn test_repeat_and_mirror_ramp() {
    let data = ramp4();
    let buf = BufferView::packed(&data, 4, 4).unwrap();
    let access = Access::new(&buf, Region::full(4, 4).unwrap()).unwrap();

    let repeat = Resampler::new(Filter::Bilinear, EdgeBorders::uniform(BorderPolicy::Repeat));
    // Tap -1 wraps to column 3
    assert_eq!(repeat.sample(&access, -0.5, 0.5), 3.0);
    // Row 4 wraps to row 0
    assert_eq!(repeat.sample(&access, 0.5, 4.5), 0.0);

    let mirror = Resampler::new(Filter::Bilinear, EdgeBorders::uniform(BorderPolicy::Mirror));
    assert_eq!(mirror.sample(&access, -0.5, 0.5), 0.0);
    assert_eq!(mirror.sample(&access, -1.5, 0.5), 1.0);
    assert_eq!(mirror.sample(&access, 5.5, 0.5), 2.0);
}

#[test]
fn test_mixed_edges() {
    let data = ramp4();
    let buf = BufferView::packed(&data, 4, 4).unwrap();
    let access = Access::with_fallback(&buf, Region::full(4, 4).unwrap(), 100.0).unwrap();

    let borders = EdgeBorders::none()
        .with_left(BorderPolicy::Constant)
        .with_right(BorderPolicy::Clamp)
        .with_top(BorderPolicy::Mirror)
        .with_bottom(BorderPolicy::Repeat);
    let r = Resampler::new(Filter::Bilinear, borders);

    assert_eq!(r.sample(&access, -0.5, 1.5), 100.0);
    assert_eq!(r.sample(&access, 6.5, 1.5), 7.0);
    assert_eq!(r.sample(&access, 1.5, -0.5), 1.0);
    assert_eq!(r.sample(&access, 1.5, 4.5), 1.0);
}

/// Buffer with a `pad`-pixel border of NaN around a `w × h` region.
fn padded(w: i32, h: i32, pad: i32) -> (Vec<f32>, i32, i32) {
    let bw = w + 2 * pad;
    let bh = h + 2 * pad;
    let mut data = vec![f32::NAN; (bw * bh) as usize];
    for y in 0..h {
        for x in 0..w {
            data[((y + pad) * bw + x + pad) as usize] = ((x * 3 + y * 5) % 7) as f32 - 2.0;
        }
    }
    (data, bw, bh)
}

#[test]
fn test_bordered_reads_stay_in_region() {
    let (data, bw, bh) = padded(7, 6, 4);
    let buf = BufferView::packed(&data, bw, bh).unwrap();
    let region = Region::new(4, 4, 7, 6).unwrap();
    let table = VariantTable::generate(
        &Filter::ALL,
        &BorderPolicy::HANDLING,
        &[DataType::F32],
        &[Backend::Buffer],
    );

    for policy in BorderPolicy::HANDLING {
        for filter in Filter::ALL {
            let id = VariantId::new(filter, policy, Edges::All, DataType::F32, Backend::Buffer);
            let variant = table.get(&id).unwrap();
            let access = if id.has_fallback() {
                Access::with_fallback(&buf, region, 0.25).unwrap()
            } else {
                Access::new(&buf, region).unwrap()
            };
            let sampler = variant.bind(access).unwrap();

            for iy in -4..=16 {
                for ix in -4..=18 {
                    let (x, y) = (ix as f32 * 0.5 + 0.1, iy as f32 * 0.5 - 0.2);
                    let v = sampler.sample(x, y);
                    assert!(v.is_finite(), "{id} read outside region at ({x}, {y})");
                }
            }
        }
    }
}

#[test]
fn test_mirror_on_tiny_regions() {
    // Wide kernels overshoot a 1- or 2-pixel region by several extents
    for size in [1, 2] {
        let (data, bw, bh) = padded(size, size, 3);
        let buf = BufferView::packed(&data, bw, bh).unwrap();
        let access = Access::new(&buf, Region::new(3, 3, size, size).unwrap()).unwrap();

        for filter in Filter::ALL {
            let r = Resampler::new(filter, EdgeBorders::uniform(BorderPolicy::Mirror));
            for y in 0..size {
                for x in 0..size {
                    let expected = data[((y + 3) * bw + x + 3) as usize];
                    let got = r.sample(&access, x as f32 + 0.5, y as f32 + 0.5);
                    assert_abs_diff_eq!(got, expected, epsilon = 1e-4);
                }
            }
            for i in -8..=8 {
                let (x, y) = (i as f32 * 0.45 + 0.3, 0.7 - i as f32 * 0.35);
                let v = r.sample(&access, x, y);
                assert!(v.is_finite(), "{filter} {size}x{size} read outside region at ({x}, {y})");
            }
        }
    }
}

#[test]
fn test_mirror_single_pixel_is_flat() {
    let data = [4.0f32];
    let buf = BufferView::packed(&data, 1, 1).unwrap();
    let access = Access::new(&buf, Region::full(1, 1).unwrap()).unwrap();
    let table = VariantTable::full();

    for (name, eps) in [
        ("interpolate_cubic_mirror_tblr_f32_buf", 1e-4),
        ("interpolate_lanczos_mirror_tblr_f32_buf", 0.2),
    ] {
        let sampler = table.lookup(name).unwrap().bind(access).unwrap();
        assert_abs_diff_eq!(sampler.sample(0.5, 0.5), 4.0, epsilon = 1e-4);
        for i in 0..10 {
            let x = i as f32 * 0.3 - 1.2;
            assert_abs_diff_eq!(sampler.sample(x, 1.0 - x), 4.0, epsilon = eps);
        }
    }
}

#[test]
fn test_exact_at_pixel_centres() {
    let (data, bw, bh) = padded(6, 5, 3);
    // Finite padding so unbordered taps with zero weight stay harmless
    let data: Vec<f32> = data.iter().map(|v| if v.is_nan() { 9.0 } else { *v }).collect();
    let buf = BufferView::packed(&data, bw, bh).unwrap();
    let region = Region::new(3, 3, 6, 5).unwrap();
    let table = VariantTable::generate(
        &[Filter::Bilinear, Filter::Bicubic],
        &BorderPolicy::HANDLING,
        &[DataType::F32],
        &[Backend::Buffer],
    );
    assert_eq!(table.len(), 2 * 37);

    for variant in table.iter() {
        let access = if variant.id().has_fallback() {
            Access::with_fallback(&buf, region, -3.0).unwrap()
        } else {
            Access::new(&buf, region).unwrap()
        };
        let sampler = variant.bind(access).unwrap();
        for y in 0..5 {
            for x in 0..6 {
                let expected = data[((y + 3) * bw + x + 3) as usize];
                let got = sampler.sample(x as f32 + 0.5, y as f32 + 0.5);
                assert_eq!(got, expected, "{} at pixel ({x}, {y})", variant.id());
            }
        }
    }
}

#[test]
fn test_constant_image_reproduced() {
    let data = vec![5.0f32; 8 * 8];
    let buf = BufferView::packed(&data, 8, 8).unwrap();
    let region = Region::new(1, 1, 6, 6).unwrap();

    for filter in [Filter::Bilinear, Filter::Bicubic] {
        for policy in BorderPolicy::HANDLING {
            let r = Resampler::new(filter, EdgeBorders::uniform(policy));
            let access = Access::with_fallback(&buf, region, 5.0).unwrap();
            for i in 0..20 {
                let x = i as f32 * 0.37 - 0.5;
                let y = 6.3 - i as f32 * 0.29;
                assert_abs_diff_eq!(r.sample(&access, x, y), 5.0, epsilon = 1e-4);
            }
        }
    }
}

#[test]
fn test_lanczos_near_unity_on_flat_field() {
    let data = vec![2.0f64; 100];
    let buf = BufferView::packed(&data, 10, 10).unwrap();
    let access = Access::new(&buf, Region::full(10, 10).unwrap()).unwrap();
    let r = Resampler::new(Filter::Lanczos3, EdgeBorders::uniform(BorderPolicy::Clamp));
    for i in 0..25 {
        let x = i as f32 * 0.41;
        assert_abs_diff_eq!(r.sample(&access, x, 10.0 - x), 2.0, epsilon = 0.05);
    }
}

#[test]
fn test_bicubic_reproduces_linear_ramp() {
    // Keys cubic reproduces polynomials up to degree one away from edges
    let data: Vec<f32> = (0..12 * 12).map(|i| (i % 12) as f32 * 2.0).collect();
    let buf = BufferView::packed(&data, 12, 12).unwrap();
    let access = Access::new(&buf, Region::full(12, 12).unwrap()).unwrap();
    let r = Resampler::new(Filter::Bicubic, EdgeBorders::none());
    for i in 0..20 {
        let x = 3.0 + i as f32 * 0.3;
        assert_abs_diff_eq!(r.sample(&access, x, 6.0), (x - 0.5) * 2.0, epsilon = 1e-3);
    }
}
