use std::io::Write;

use crate::align::structs::Alignment;

use anyhow::{Context, Result};

pub const DEFAULT_FIELDS: [Field; 9] = [
    Field::Seq1,
    Field::Seq2,
    Field::Seq1Length,
    Field::Seq2Length,
    Field::AlignmentLength,
    Field::Score,
    Field::Identity,
    Field::GapPenalty,
    Field::EndGapPenalty,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Seq1,
    Seq2,
    Seq1Length,
    Seq2Length,
    AlignmentLength,
    Score,
    Identity,
    GapPenalty,
    EndGapPenalty,
}

impl Field {
    pub fn extract_from(&self, alignment: &Alignment) -> String {
        match self {
            Field::Seq1 => alignment.seq1_name.clone(),
            Field::Seq2 => alignment.seq2_name.clone(),
            Field::Seq1Length => alignment.seq1_length.to_string(),
            Field::Seq2Length => alignment.seq2_length.to_string(),
            Field::AlignmentLength => alignment.length.to_string(),
            Field::Score => alignment.score.to_string(),
            Field::Identity => format!("{:.2}", alignment.percent_identity),
            Field::GapPenalty => alignment.params.gap_penalty.to_string(),
            Field::EndGapPenalty => alignment.params.end_gap_penalty.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct TableFormat {
    pub fields: Vec<Field>,
    pub labels: Vec<Vec<String>>,
    pub min_widths: Vec<usize>,
    pub widths: Vec<usize>,
}

impl TableFormat {
    pub fn new(fields: &[Field]) -> Result<Self> {
        let mut labels = vec![];
        let mut min_widths = vec![];
        let mut widths = vec![];

        // this regex matches CamelCaseWords, keeping trailing digits
        let label_regex =
            regex::Regex::new(r"[A-Z][a-z0-9]*").context("failed to build field label regex")?;

        // this closure extracts the words & minimum column width for a field
        let label_fn = |field: &Field| -> Result<(Vec<String>, usize)> {
            // the Debug string for an enum produces the variant name
            let field_name = format!("{:?}", field);

            // grab each word and its length in the variant name
            let (label_words, lengths): (Vec<_>, Vec<_>) = label_regex
                .find_iter(&field_name)
                .map(|m| (m.as_str().to_lowercase(), m.len()))
                .unzip();

            // the length of the longest word
            // is the min width of the column
            let min_width = *lengths
                .iter()
                .max()
                .context("failed to produce max field label width")?;
            Ok((label_words, min_width))
        };

        let first_field = fields.first().context("no table fields provided")?;

        // the first field needs +2 on its width
        // to accommodate the "# " prefix
        let (mut label_words, mut min_width) = label_fn(first_field)?;
        labels.push(label_words);
        widths.push(min_width + 2);
        min_widths.push(min_width + 2);

        for field in fields.iter().skip(1) {
            (label_words, min_width) = label_fn(field)?;
            labels.push(label_words);
            widths.push(min_width);
            min_widths.push(min_width);
        }

        Ok(Self {
            fields: fields.to_vec(),
            labels,
            min_widths,
            widths,
        })
    }

    pub fn update_widths(&mut self, alignments: &[Alignment]) {
        alignments.iter().for_each(|alignment| {
            self.fields
                .iter()
                .zip(self.widths.iter_mut())
                .for_each(|(field, width)| {
                    *width = (*width).max(field.extract_from(alignment).len());
                });
        });
    }

    pub fn reset_widths(&mut self) {
        self.widths
            .iter_mut()
            .zip(self.min_widths.iter())
            .for_each(|(width, min_width)| *width = *min_width);
    }

    pub fn header(&self) -> Result<String> {
        // the number of rows in the header is
        // the max number of words in a field
        let num_rows = self
            .labels
            .iter()
            .map(|l| l.len())
            .max()
            .context("field headers are empty")?;

        let mut header_row_strings: Vec<String> = vec!["# ".to_string(); num_rows + 1];

        // this function appends the field labels to the header,
        // bottom-aligned, with a dashed rule underneath
        let header_append_fn = |words: &[String], width: usize, rows: &mut [String]| {
            let offset = num_rows - words.len();
            let mut words_padded = vec![""; offset];
            words.iter().for_each(|w| words_padded.push(w));

            words_padded.iter().enumerate().for_each(|(row, token)| {
                let row_string = &mut rows[row];
                *row_string = format!("{row_string}{:width$} ", token, width = width);
            });

            if let Some(rule_string) = rows.last_mut() {
                *rule_string = format!("{rule_string}{} ", "-".repeat(width));
            }
        };

        // the first column gets -2 to its width to account for the "# "
        header_append_fn(&self.labels[0], self.widths[0] - 2, &mut header_row_strings);

        self.labels
            .iter()
            .skip(1)
            .zip(self.widths.iter().skip(1))
            .for_each(|(words, &width)| {
                header_append_fn(words, width, &mut header_row_strings);
            });

        Ok(header_row_strings
            .iter()
            .map(|row| row.trim_end())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

/// Write a header and one row per alignment, using the default fields.
pub fn write_tabular_output(alignments: &[Alignment], out: &mut impl Write) -> Result<()> {
    let mut format = TableFormat::new(&DEFAULT_FIELDS)?;
    format.update_widths(alignments);

    writeln!(out, "{}", format.header()?).context("failed to write table header")?;
    for alignment in alignments {
        writeln!(out, "{}", alignment.tab_string_formatted(&format))
            .context("failed to write table row")?;
    }

    Ok(())
}
