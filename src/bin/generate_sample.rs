use std::path::PathBuf;

use anyhow::Result;

use plate_curves::sample::SamplePlate;

fn main() -> Result<()> {
    env_logger::init();

    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)?;

    let plate = SamplePlate::default();
    let workbook = dir.join("sample_plate.xlsx");
    let conditions = dir.join("conditions.txt");
    plate.write_workbook(&workbook)?;
    plate.write_conditions(&conditions)?;

    println!(
        "Wrote {} conditions x {} replicates ({} reads each) to {} with {}",
        plate.conditions.len(),
        plate.rep,
        plate.point_count(),
        workbook.display(),
        conditions.display()
    );
    println!(
        "Try: plate-curves extract --input-file-name sample_plate.xlsx --sheet-name \"{}\" \
         --condition-file conditions.txt --measurements OD600 RFP --output-files od.csv rfp.csv",
        plate.sheet_name
    );
    Ok(())
}
