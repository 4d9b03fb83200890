use crate::error::WorkflowError;
use crate::models::Video;
use chrono::NaiveDate;

/// Drop a scheduled day onto another day.
///
/// `from` must be one of the video's publish dates. If `to` is already
/// scheduled the two entries collapse into one. Dates stay sorted.
pub fn move_date(video: &mut Video, from: NaiveDate, to: NaiveDate) -> Result<(), WorkflowError> {
    let index = video
        .publish_dates
        .binary_search(&from)
        .map_err(|_| WorkflowError::NotScheduled {
            id: video.id.clone(),
            date: from,
        })?;

    if from == to {
        return Ok(());
    }

    video.publish_dates.remove(index);
    add_date(video, to);
    Ok(())
}

/// Schedule the video on `date`. Returns false if it already was.
pub fn add_date(video: &mut Video, date: NaiveDate) -> bool {
    match video.publish_dates.binary_search(&date) {
        Ok(_) => false,
        Err(position) => {
            video.publish_dates.insert(position, date);
            true
        }
    }
}

/// Take the video off `date`
pub fn remove_date(video: &mut Video, date: NaiveDate) -> Result<(), WorkflowError> {
    let index = video
        .publish_dates
        .binary_search(&date)
        .map_err(|_| WorkflowError::NotScheduled {
            id: video.id.clone(),
            date,
        })?;
    video.publish_dates.remove(index);
    Ok(())
}
