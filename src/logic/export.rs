//! CSV export of the scoreboard. Passwords are never exported.

use crate::models::Scoreboard;

pub fn scoreboard_csv(board: &Scoreboard) -> Result<String, csv::Error> {
    let mut w = csv::Writer::from_writer(Vec::new());
    w.write_record(["name", "team", "color", "losses", "dates"])?;
    for p in board.iter() {
        let losses = p.losses.to_string();
        let dates = p.dates.join("; ");
        w.write_record([
            p.name.as_str(),
            p.team.as_str(),
            p.color.as_str(),
            losses.as_str(),
            dates.as_str(),
        ])?;
    }
    let bytes = w.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
