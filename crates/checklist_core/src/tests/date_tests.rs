use super::*;

#[test]
fn month_year_time_decode_drops_the_day() {
    let format = Some(DateFormat::MonthYearTime);
    assert_eq!(decode_date(format, "15/03/2024 10:30"), "03/2024 10:30");
    assert_eq!(decode_date(format, "03/2024 10:30"), "03/2024 10:30");
    assert_eq!(decode_date(format, "15/03/2024"), "03/2024");
}

#[test]
fn other_layouts_decode_unchanged() {
    assert_eq!(
        decode_date(Some(DateFormat::DateTimeSeconds), "15/03/2024 10:30:00"),
        "15/03/2024 10:30:00"
    );
    assert_eq!(
        decode_date(Some(DateFormat::DateOnly), "15/03/2024"),
        "15/03/2024"
    );
    assert_eq!(decode_date(None, "whatever"), "whatever");
}

#[test]
fn input_kind_follows_descriptor() {
    assert_eq!(DateInputKind::for_format(None), DateInputKind::DateTime);
    assert_eq!(
        DateInputKind::for_format(Some(DateFormat::MonthYearTime)).html_type(),
        "month"
    );
    assert_eq!(
        DateInputKind::for_format(Some(DateFormat::DateOnly)).html_type(),
        "date"
    );
    assert_eq!(
        DateInputKind::for_format(Some(DateFormat::TimeOnly)).html_type(),
        "time"
    );
}

#[test]
fn renders_stored_values_in_input_layout() {
    assert_eq!(
        to_input_layout(Some(DateFormat::DateTimeSeconds), "15/03/2024 10:30:45"),
        "2024-03-15T10:30:45"
    );
    assert_eq!(
        to_input_layout(Some(DateFormat::MonthYearTime), "03/2024 10:30"),
        "2024-03"
    );
    assert_eq!(
        to_input_layout(Some(DateFormat::MonthYearTime), "15/03/2024 10:30"),
        "2024-03"
    );
    assert_eq!(
        to_input_layout(Some(DateFormat::DateOnly), "15/03/2024"),
        "2024-03-15"
    );
    assert_eq!(to_input_layout(Some(DateFormat::TimeOnly), "10:30"), "10:30");
    assert_eq!(time_input("03/2024 10:30"), "10:30");
    assert_eq!(time_input("03/2024"), "");
}

#[test]
fn unparsable_values_pass_through_render() {
    assert_eq!(
        to_input_layout(Some(DateFormat::DateOnly), "soon"),
        "soon"
    );
    assert_eq!(
        to_input_layout(Some(DateFormat::DateTimeSeconds), "31/02/2024 10:00"),
        "31/02/2024 10:00"
    );
    assert_eq!(to_input_layout(Some(DateFormat::MonthYearTime), "13/2024"), "13/2024");
    assert_eq!(to_input_layout(Some(DateFormat::DateOnly), ""), "");
}

#[test]
fn writes_input_back_in_stored_layout() {
    assert_eq!(
        from_input_layout(
            Some(DateFormat::DateTimeSeconds),
            DateInputKind::DateTime,
            "2024-03-15T10:30",
            ""
        ),
        "15/03/2024 10:30"
    );
    assert_eq!(
        from_input_layout(Some(DateFormat::DateOnly), DateInputKind::Date, "2024-03-15", ""),
        "15/03/2024"
    );
    assert_eq!(
        from_input_layout(Some(DateFormat::TimeOnly), DateInputKind::Time, "08:15", "07:00"),
        "08:15"
    );
}

#[test]
fn month_year_time_edits_keep_the_other_half() {
    let format = Some(DateFormat::MonthYearTime);
    assert_eq!(
        from_input_layout(format, DateInputKind::Month, "2024-05", "03/2024 10:30"),
        "05/2024 10:30"
    );
    assert_eq!(
        from_input_layout(format, DateInputKind::Month, "2024-05", ""),
        "05/2024 00:00"
    );
    assert_eq!(
        from_input_layout(format, DateInputKind::Time, "18:45", "03/2024 10:30"),
        "03/2024 18:45"
    );
    assert_eq!(
        from_input_layout(format, DateInputKind::Time, "18:45", ""),
        "01/2024 18:45"
    );
}

#[test]
fn unparsable_input_passes_through_write_back() {
    assert_eq!(
        from_input_layout(Some(DateFormat::DateOnly), DateInputKind::Date, "", "15/03/2024"),
        ""
    );
    assert_eq!(
        from_input_layout(
            Some(DateFormat::DateTimeSeconds),
            DateInputKind::DateTime,
            "garbage",
            ""
        ),
        "garbage"
    );
}

#[test]
fn listing_dates_render_day_first() {
    assert_eq!(format_listing_date("2024-03-15T10:30:00"), "15/03/2024 10:30");
    assert_eq!(format_listing_date("2024-03-15T10:30:00.123"), "15/03/2024 10:30");
    assert_eq!(format_listing_date("2024-03-15"), "15/03/2024 00:00");
    assert_eq!(format_listing_date(""), "-");
    assert_eq!(format_listing_date("ontem"), "ontem");
}
