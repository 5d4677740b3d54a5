use crate::core::{CoverageReport, ReconciliationOutput, TsmComparison};
use crate::io::output::OutputWriter;
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_results(&mut self, results: &ReconciliationOutput) -> anyhow::Result<()> {
        let writers: Vec<fn(&mut Self, &ReconciliationOutput) -> anyhow::Result<()>> = vec![
            |w, _| w.write_header(),
            |w, r| w.write_list("Missing IDs:", &r.missing_ids),
            |w, r| w.write_duplicates(r),
            |w, r| {
                w.write_tsm_list("Missing Cases in CODE:", r, |t| {
                    t.should_be_in_code.as_slice()
                })
            },
            |w, r| {
                w.write_tsm_list("Missing Cases in ZEPHYR:", r, |t| {
                    t.should_be_in_zephyr.as_slice()
                })
            },
            |w, r| {
                w.write_tsm_list("Missing Labels in ZEPHYR:", r, |t| t.missing_status.as_slice())
            },
            |w, r| {
                w.write_tsm_list("Deprecated Cases in ZEPHYR:", r, |t| {
                    t.deprecated_case.as_slice()
                })
            },
            |w, r| match &r.coverage {
                Some(coverage) => w.write_coverage(coverage),
                None => Ok(()),
            },
        ];

        writers.iter().try_for_each(|writer| writer(self, results))
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self) -> anyhow::Result<()> {
        writeln!(self.writer, "### Zephyr integration check")?;
        Ok(())
    }

    fn open_section(&mut self, summary: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "<details>")?;
        writeln!(self.writer, "<summary>{summary}</summary>")?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn close_section(&mut self) -> anyhow::Result<()> {
        writeln!(self.writer, "</details>")?;
        Ok(())
    }

    fn write_list(&mut self, summary: &str, items: &[String]) -> anyhow::Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        self.open_section(summary)?;
        for item in items {
            writeln!(self.writer, "- {item}")?;
        }
        self.close_section()
    }

    fn write_tsm_list(
        &mut self,
        summary: &str,
        results: &ReconciliationOutput,
        select: fn(&TsmComparison) -> &[String],
    ) -> anyhow::Result<()> {
        match &results.tsm {
            Some(tsm) => self.write_list(summary, select(tsm)),
            None => Ok(()),
        }
    }

    fn write_duplicates(&mut self, results: &ReconciliationOutput) -> anyhow::Result<()> {
        if results.duplicate_keys.is_empty() {
            return Ok(());
        }
        self.open_section("Duplicated IDs:")?;
        for (key, count) in &results.duplicate_keys {
            writeln!(self.writer, "- {key}: {count}")?;
        }
        self.close_section()
    }

    fn write_coverage(&mut self, coverage: &CoverageReport) -> anyhow::Result<()> {
        let counts = &coverage.count_by_automation_status;
        let p = &coverage.percentages;

        self.open_section("Automation coverage:")?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Total cases | {} |", coverage.total_cases)?;
        writeln!(
            self.writer,
            "| Non-deprecated cases | {} |",
            coverage.non_deprecated_cases
        )?;
        writeln!(self.writer, "| Automated | {} |", counts.done)?;
        writeln!(self.writer, "| Not automated | {} |", counts.none)?;
        writeln!(
            self.writer,
            "| Won't / Duplicate / Deprecated | {} / {} / {} |",
            counts.wont, counts.duplicate, counts.deprecated
        )?;
        writeln!(
            self.writer,
            "| Can be automated | {} ({:.2}%) |",
            coverage.can_be_automated, p.can_be_automated
        )?;
        writeln!(
            self.writer,
            "| Cannot be automated | {} ({:.2}%) |",
            coverage.total_wont, p.wont
        )?;
        writeln!(
            self.writer,
            "| Automated of automatable | {:.2}% |",
            p.automated_of_can_be
        )?;
        writeln!(self.writer, "| Automated of total | {:.2}% |", p.automated_of_total)?;
        writeln!(
            self.writer,
            "| Not automated of automatable | {:.2}% |",
            p.not_automated_of_can_be
        )?;
        writeln!(
            self.writer,
            "| Not automated of total | {:.2}% |",
            p.not_automated_of_total
        )?;
        self.close_section()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn render(results: &ReconciliationOutput) -> String {
        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer)
            .write_results(results)
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_empty_output_is_header_only() {
        assert_eq!(
            render(&ReconciliationOutput::default()),
            "### Zephyr integration check\n"
        );
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let results = ReconciliationOutput {
            missing_ids: vec!["a.B.noKey".into()],
            duplicate_keys: [("PROJ-T1".to_string(), 3)].into_iter().collect(),
            tsm: Some(TsmComparison {
                should_be_in_zephyr: vec!["PROJ-T9 in test9".into()],
                deprecated_case: vec!["PROJ-T4 in test4".into()],
                ..Default::default()
            }),
            coverage: None,
        };

        let expected = indoc! {"
            ### Zephyr integration check
            <details>
            <summary>Missing IDs:</summary>

            - a.B.noKey
            </details>
            <details>
            <summary>Duplicated IDs:</summary>

            - PROJ-T1: 3
            </details>
            <details>
            <summary>Missing Cases in ZEPHYR:</summary>

            - PROJ-T9 in test9
            </details>
            <details>
            <summary>Deprecated Cases in ZEPHYR:</summary>

            - PROJ-T4 in test4
            </details>
        "};
        assert_eq!(render(&results), expected);
    }
}
