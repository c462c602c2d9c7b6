/// Text for the footer year element.
#[inline]
pub fn year_text(year: u32) -> String {
    format!("{:04}", year)
}
