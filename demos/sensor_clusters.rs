use ndarray::{array, Axis};
use vitals::batch::Batched;
use vitals::cluster::{Clustering, InitPolicy, MiniBatchKmeans};
use vitals::datasets::make_blobs;
use vitals::preprocess::{column_variance, standardize};
use vitals::reduce::{DimensionReducer, Pca};
use vitals::{purity, records_to_matrix, SensorRecord, FEATURE_NAMES};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // End-to-end: records -> matrix -> z-score -> PCA(2) -> mini-batch k-means(3).
    //
    // Three synthetic behavioral profiles stand in for cleaned smartwatch data.
    let profiles = array![
        [62.0, 98.0, 2500.0, 8.5, 1.0, 2.0],
        [78.0, 97.0, 9000.0, 7.0, 2.0, 5.0],
        [95.0, 95.0, 16000.0, 5.5, 3.0, 8.0],
    ];
    let (raw, truth) = make_blobs(profiles.view(), 60, 0.8, 7)?;

    let records: Vec<SensorRecord> = raw
        .axis_iter(Axis(0))
        .enumerate()
        .map(|(i, r)| SensorRecord {
            user_id: 1000 + i as u64,
            heart_rate_bpm: r[0],
            blood_oxygen_pct: r[1],
            step_count: r[2],
            sleep_hours: r[3],
            activity_level: r[4],
            stress_level: r[5],
        })
        .collect();

    let features = records_to_matrix(&records)?;
    let scaled = standardize(features.view())?;

    let mut pca = Pca::new(2);
    let projected = pca.fit_transform(scaled.view())?;

    // How much of each feature survives the 2D projection.
    let error = pca.reconstruction_error(scaled.view(), projected.view())?;
    let variance = column_variance(scaled.view())?;
    println!("feature                     recon_err  variance");
    for ((name, e), v) in FEATURE_NAMES.iter().zip(error.iter()).zip(variance.iter()) {
        println!("{name:<26} {e:>10.4} {v:>9.4}");
    }
    if let Some(ratio) = pca.explained_variance_ratio() {
        println!("explained variance ratio: {ratio:.3}");
    }

    // Batches are taken in row order, like a non-shuffling data loader, so
    // the first batch holds a single profile. Seed from the whole sequence.
    let batches = Batched::new(projected.view(), 32)?;
    let mut kmeans = MiniBatchKmeans::new(3)
        .with_seed(42)
        .with_init(InitPolicy::Reservoir)
        .with_max_epochs(200);
    let report = kmeans.fit(&batches)?;
    println!(
        "k-means: epochs={} converged={} max_shift={:.2e}",
        report.epochs_run, report.converged, report.max_shift
    );

    let labels = kmeans.assign(&batches)?;
    let mut sizes = [0usize; 3];
    for &l in &labels {
        sizes[l] += 1;
    }
    println!("cluster sizes: {sizes:?}");
    println!("purity vs. generating profile: {:.3}", purity(&labels, &truth));

    Ok(())
}
