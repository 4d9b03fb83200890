use crate::calendar::{bucket_videos, DateRange};
use crate::constants::{INSTALLMENT_MARKERS, TITLE_SEPARATORS};
use crate::models::{CalendarEvent, Video};
use crate::utils::{format_date, slugify};
use chrono::NaiveDate;
use std::collections::HashSet;

/// How videos sharing a day are merged into calendar events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grouping {
    /// One event per day
    #[default]
    ByDate,
    /// One event per day and series prefix
    ByProject,
}

/// Series part of a title: the text before the first separator, minus a
/// trailing installment marker.
///
/// "Kitchen Remodel - Demo Day" and "Customer Story Ep 2" yield
/// "Kitchen Remodel" and "Customer Story".
pub fn series_prefix(title: &str) -> String {
    let title = title.trim();
    let cut = TITLE_SEPARATORS
        .iter()
        .filter_map(|sep| title.find(sep))
        .filter(|&index| index > 0)
        .min();

    let head = match cut {
        Some(index) => title[..index].trim_end(),
        None => title,
    };

    strip_installment(head)
}

fn strip_installment(s: &str) -> String {
    let words: Vec<&str> = s.split_whitespace().collect();
    if words.len() >= 3 {
        let number = words[words.len() - 1];
        let marker = words[words.len() - 2].to_lowercase();
        if !number.is_empty()
            && number.chars().all(|c| c.is_ascii_digit())
            && INSTALLMENT_MARKERS.contains(&marker.as_str())
        {
            return words[..words.len() - 2].join(" ");
        }
    }
    words.join(" ")
}

fn make_event(date: NaiveDate, title: String, mut videos: Vec<Video>) -> CalendarEvent {
    videos.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
    CalendarEvent {
        id: format!("evt-{}-{}", format_date(date), slugify(&title)),
        date,
        title,
        videos,
    }
}

/// Order events by date then title, and suffix repeated ids with `-2`, `-3`...
/// so titles that slug alike ("Intro!" and "Intro?") stay distinct.
fn sort_events(events: &mut [CalendarEvent]) {
    events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.title.cmp(&b.title)));

    let mut used: HashSet<String> = HashSet::with_capacity(events.len());
    for event in events.iter_mut() {
        if !used.contains(&event.id) {
            used.insert(event.id.clone());
            continue;
        }
        let mut n = 2;
        while used.contains(&format!("{}-{}", event.id, n)) {
            n += 1;
        }
        event.id = format!("{}-{}", event.id, n);
        used.insert(event.id.clone());
    }
}

/// One event per visible day holding every video scheduled that day
pub fn group_by_date<'a, I>(videos: I, range: &DateRange) -> Vec<CalendarEvent>
where
    I: IntoIterator<Item = &'a Video>,
{
    let mut events: Vec<CalendarEvent> = bucket_videos(videos, range)
        .into_iter()
        .map(|(date, videos)| {
            let title = match videos.as_slice() {
                [single] => single.title.clone(),
                many => format!("{} videos", many.len()),
            };
            make_event(date, title, videos)
        })
        .collect();
    sort_events(&mut events);
    events
}

/// One event per visible day and series. Videos whose titles share a
/// series prefix on the same day become a single project event titled
/// with the prefix; a lone video keeps its own title.
pub fn group_by_project<'a, I>(videos: I, range: &DateRange) -> Vec<CalendarEvent>
where
    I: IntoIterator<Item = &'a Video>,
{
    let mut events = Vec::new();

    for (date, day_videos) in bucket_videos(videos, range) {
        // (lowercased prefix, display prefix, videos), in first-seen order
        let mut series: Vec<(String, String, Vec<Video>)> = Vec::new();
        for video in day_videos {
            let prefix = series_prefix(&video.title);
            let key = prefix.to_lowercase();
            match series.iter_mut().find(|(k, _, _)| *k == key) {
                Some((_, _, members)) => members.push(video),
                None => series.push((key, prefix, vec![video])),
            }
        }

        for (_, prefix, members) in series {
            let title = if members.len() == 1 {
                members[0].title.clone()
            } else {
                prefix
            };
            events.push(make_event(date, title, members));
        }
    }

    sort_events(&mut events);
    events
}
