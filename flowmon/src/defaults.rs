/// Flow monitor reports extracted by the batch, in order, each paired with
/// the LaTeX table it produces.
///
/// Paths are relative to the working directory.
pub const JOBS: [(&str, &str); 4] = [
    ("second-assignment-spectrum-1ap.xml", "spect-1ap.tex"),
    ("second-assignment-spectrum-2ap.xml", "spect-2ap.tex"),
    ("second-assignment-yans-1ap.xml", "yans-1ap.tex"),
    ("second-assignment-yans-2ap.xml", "yans-2ap.tex"),
];
