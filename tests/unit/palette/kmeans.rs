use super::*;

fn two_blobs() -> Vec<Rgb8> {
    let mut v = Vec::new();
    for i in 0..50u8 {
        v.push(Rgb8::new(10 + i % 5, 10, 10));
        v.push(Rgb8::new(240, 240 - i % 5, 240));
    }
    v
}

#[test]
fn separates_well_spaced_clusters() {
    let mut rng = Rng64::new(3);
    let mut centers = KMeans::default().cluster(&two_blobs(), 2, &mut rng).unwrap();
    centers.sort_by_key(|c| c.r);
    assert_eq!(centers.len(), 2);
    assert!(centers[0].r < 20 && centers[0].g == 10);
    assert!(centers[1].r == 240 && centers[1].g > 230);
}

#[test]
fn same_seed_same_centroids() {
    let samples: Vec<Rgb8> = (0..500u32)
        .map(|i| Rgb8::new((i * 7 % 256) as u8, (i * 13 % 256) as u8, (i * 29 % 256) as u8))
        .collect();
    let a = KMeans::default()
        .cluster(&samples, 8, &mut Rng64::new(11))
        .unwrap();
    let b = KMeans::default()
        .cluster(&samples, 8, &mut Rng64::new(11))
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 8);
}

#[test]
fn returns_exactly_k_even_for_uniform_input() {
    let samples = vec![Rgb8::new(5, 6, 7); 20];
    let centers = KMeans::default()
        .cluster(&samples, 4, &mut Rng64::new(0))
        .unwrap();
    assert_eq!(centers, vec![Rgb8::new(5, 6, 7); 4]);
}

#[test]
fn rejects_bad_k() {
    let samples = two_blobs();
    let mut rng = Rng64::new(0);
    assert!(matches!(
        KMeans::default().cluster(&samples, 0, &mut rng),
        Err(PalError::EmptyPalette)
    ));
    assert!(matches!(
        KMeans::default().cluster(&samples, 300, &mut rng),
        Err(PalError::PaletteTooLarge { .. })
    ));
    assert!(matches!(
        KMeans::default().cluster(&samples[..3], 4, &mut rng),
        Err(PalError::InsufficientSamples {
            needed: 4,
            available: 3
        })
    ));
}
