// Readers for the CSV exports of the Assembly datasets.

use std::fs::File;

use chrono::Datelike;
use csv::StringRecord;

use crate::dash::{
    io_common::{parse_count, parse_flag, parse_vote_date, simplify_file_name, Columns},
    *,
};

/// One line of a CSV file, with enough context to report bad values.
struct Row<'a> {
    path: &'a str,
    lineno: usize,
    line: &'a StringRecord,
}

impl<'a> Row<'a> {
    fn get(&self, idx: usize) -> &'a str {
        self.line.get(idx).unwrap_or("").trim()
    }

    fn parse<T, F>(&self, idx: usize, column: &str, f: F) -> DashResult<T>
    where
        F: Fn(&str) -> Option<T>,
    {
        let value = self.get(idx);
        match f(value) {
            Some(x) => Ok(x),
            None => InvalidFieldSnafu {
                path: self.path,
                lineno: self.lineno,
                column,
                value,
            }
            .fail(),
        }
    }
}

fn open_records(path: &Path) -> DashResult<(Columns, csv::StringRecordsIntoIter<File>)> {
    let path_s = path.display().to_string();
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context(CsvOpenSnafu {
            path: path_s.clone(),
        })?;
    let header = rdr
        .headers()
        .context(CsvLineParseSnafu {
            path: path_s,
            lineno: 1_usize,
        })?
        .clone();
    let columns = Columns::from_header(path, &header);
    Ok((columns, rdr.into_records()))
}

/// Reads every line of a CSV file with `parse_row`. Line numbers start at 1
/// with the header.
fn read_rows<T, F>(path: &Path, mut parse_row: F) -> BDashResult<Vec<T>>
where
    F: FnMut(&Columns, &Row<'_>) -> DashResult<T>,
{
    let path_s = path.display().to_string();
    let (columns, records) = open_records(path)?;
    let mut res: Vec<T> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu {
            path: path_s.clone(),
            lineno,
        })?;
        let row = Row {
            path: path_s.as_str(),
            lineno,
            line: &line,
        };
        res.push(parse_row(&columns, &row)?);
    }
    info!("{}: {} rows", simplify_file_name(path), res.len());
    Ok(res)
}

/// Reads the deputies. The ages are computed for the year of `today`.
pub fn read_deputies(path: &Path, today: NaiveDate) -> BDashResult<Vec<Deputy>> {
    read_rows(path, |cols, row| {
        let code = row.get(cols.index("code")?).to_string();
        let sex = row.parse(cols.index("sex")?, "sex", Sex::parse)?;
        let date_of_birth = row.get(cols.index("date of birth")?).to_string();
        let age = age_from_birth_date(&date_of_birth, today.year());
        if age.is_none() {
            warn!(
                "{} line {}: cannot read the date of birth {:?} of deputy {}",
                row.path, row.lineno, date_of_birth, code
            );
        }
        Ok(Deputy {
            code,
            first_name: row.get(cols.index("first name")?).to_string(),
            family_name: row.get(cols.index("family name")?).to_string(),
            sex,
            date_of_birth,
            age,
            department: row.get(cols.index("dep")?).to_string(),
            department_code: row.get(cols.index("num_dep")?).to_string(),
            circumscription: cols
                .optional("circo")
                .map(|i| row.get(i))
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string()),
            party: row.get(cols.index("pol party")?).to_string(),
            activity: row.get(cols.index("activity")?).to_string(),
        })
    })
}

pub fn read_vote_events(path: &Path) -> BDashResult<Vec<VoteEvent>> {
    read_rows(path, |cols, row| {
        let code_i = cols.index_of_any(&["scrutin", "code"])?;
        let date_s = row.get(cols.index("date")?);
        let date = parse_vote_date(date_s);
        if date.is_none() {
            warn!(
                "{} line {}: invalid date {:?}",
                row.path, row.lineno, date_s
            );
        }
        let requesters: Vec<(String, String)> = cols
            .with_prefix("demandeur ")
            .into_iter()
            .map(|(field, i)| (field, row.get(i).to_string()))
            .collect();
        Ok(VoteEvent {
            code: row.get(code_i).to_string(),
            date,
            votes_for: row.parse(cols.index("pour")?, "pour", parse_count)?,
            voters: row.parse(cols.index("nb votants")?, "nb votants", parse_count)?,
            required: row.parse(cols.index("requis")?, "requis", parse_count)?,
            requesters,
        })
    })
}

pub fn read_vote_records(path: &Path) -> BDashResult<Vec<VoteRecord>> {
    read_rows(path, |cols, row| {
        let flag = |column: &str| -> DashResult<f64> {
            row.parse(cols.index(column)?, column, parse_flag)
        };
        let flags = VoteFlags {
            in_favor: flag("pour")?,
            against: flag("contre")?,
            abstention: flag("abstentions")?,
            absent: flag("non votants")?,
            by_delegation: flag("par delegation")?,
        };
        let cause = match cols.optional("cause").map(|i| row.get(i)) {
            None | Some("") => NO_CAUSE.to_string(),
            Some(x) => x.to_string(),
        };
        Ok(VoteRecord {
            event: row.get(cols.index("scrutin")?).to_string(),
            deputy: row.get(cols.index("deputy code")?).to_string(),
            flags,
            cause,
        })
    })
}

pub fn read_parties(path: &Path) -> BDashResult<Vec<PoliticalParty>> {
    read_rows(path, |cols, row| {
        Ok(PoliticalParty {
            abbreviation: row.get(cols.index("abreviated_name")?).to_string(),
            name: row.get(cols.index("name")?).to_string(),
            members: row.parse(cols.index("members")?, "members", parse_count)?,
            color: row.get(cols.index("color")?).to_string(),
        })
    })
}

pub fn read_organs(path: &Path) -> BDashResult<Vec<Organ>> {
    read_rows(path, |cols, row| {
        Ok(Organ {
            code: row.get(cols.index("code")?).to_string(),
            name: row.get(cols.index("name")?).to_string(),
            organ_type: OrganType::from_code(row.get(cols.index("type")?)),
        })
    })
}

pub fn read_memberships(path: &Path) -> BDashResult<Vec<DeputyOrganMembership>> {
    read_rows(path, |cols, row| {
        Ok(DeputyOrganMembership {
            deputy_code: row.get(cols.index("code_deputy")?).to_string(),
            organ_code: row.get(cols.index("code_organe")?).to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dash::test_data_dir;

    fn data(name: &str) -> PathBuf {
        Path::new(&test_data_dir()).join(name)
    }

    fn temp_csv(name: &str, contents: &str) -> PathBuf {
        let p = std::env::temp_dir().join(name);
        fs::write(&p, contents).unwrap();
        p
    }

    #[test]
    fn deputies() {
        let today = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
        let deputies = read_deputies(&data("df_dep.csv"), today).unwrap();
        assert_eq!(deputies.len(), 5);
        let anne = &deputies[0];
        assert_eq!(anne.code, "PA1");
        assert_eq!(anne.full_name(), "Anne Martin");
        assert_eq!(anne.sex, Sex::Female);
        assert_eq!(anne.age, Some(50));
        assert_eq!(anne.departement(), "Paris (75)");
        assert_eq!(anne.circumscription.as_deref(), Some("1"));
        // Bad date of birth
        assert_eq!(deputies[3].age, None);
        assert_eq!(deputies[4].department_code, "2A");
    }

    #[test]
    fn vote_events() {
        let events = read_vote_events(&data("df_vote_descr.csv")).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0].date,
            Some(VoteDate {
                year: 2019,
                month: 7,
                day: 14
            })
        );
        assert!(events[0].accepted());
        assert_eq!(
            events[0].requesters,
            vec![
                ("groupe".to_string(), "LAREM".to_string()),
                ("texte".to_string(), "Projet de loi".to_string())
            ]
        );
        assert_eq!(events[1].date, None);
        assert!(!events[1].accepted());
        // Empty requester cells are kept.
        assert_eq!(
            events[1].requesters,
            vec![
                ("groupe".to_string(), "".to_string()),
                ("texte".to_string(), "Proposition".to_string())
            ]
        );
    }

    #[test]
    fn vote_records() {
        let records = read_vote_records(&data("df_vote_total.csv")).unwrap();
        assert_eq!(records.len(), 8);
        assert_eq!(records[0].flags.in_favor, 1.0);
        assert_eq!(records[0].cause, NO_CAUSE);
        assert_eq!(records[5].flags.absent, 1.0);
        assert_eq!(records[5].cause, "PAN");
        // Numeric indicators
        assert_eq!(records[7].flags.in_favor, 1.0);
        assert_eq!(records[7].flags.against, 0.0);
    }

    #[test]
    fn parties_organs_memberships() {
        let parties = read_parties(&data("df_polpar.csv")).unwrap();
        assert_eq!(parties.len(), 3);
        assert_eq!(parties[0].abbreviation, "LAREM");
        assert_eq!(parties[0].members, 3);
        let organs = read_organs(&data("df_organs.csv")).unwrap();
        assert_eq!(organs.len(), 5);
        assert_eq!(organs[0].organ_type, OrganType::Committee);
        assert_eq!(organs[3].organ_type, OrganType::ParliamentaryGroup);
        let memberships = read_memberships(&data("df_deputies_in_organs.csv")).unwrap();
        assert_eq!(memberships.len(), 9);
        assert_eq!(memberships[0].deputy_code, "PA1");
    }

    #[test]
    fn missing_column() {
        let p = temp_csv(
            "assemblee_io_missing_column.csv",
            "code,name\nO1,Commission des finances\n",
        );
        let res = read_organs(&p);
        assert!(matches!(
            res.map_err(|e| *e),
            Err(DashError::MissingColumn { .. })
        ));
    }

    #[test]
    fn invalid_sex() {
        let p = temp_csv(
            "assemblee_io_invalid_sex.csv",
            "code,first name,family name,sex,date of birth,dep,num_dep,pol party,activity\n\
             PA1,Anne,Martin,unknown,1970-05-01,Paris,75,LAREM,Cadre\n",
        );
        let today = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
        match read_deputies(&p, today).map_err(|e| *e) {
            Err(DashError::InvalidField { lineno, column, .. }) => {
                assert_eq!(lineno, 2);
                assert_eq!(column, "sex");
            }
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn invalid_vote_indicator() {
        let p = temp_csv(
            "assemblee_io_invalid_indicator.csv",
            "scrutin,deputy code,pour,contre,abstentions,non votants,par delegation\n\
             V1,PA1,True,False,False,False,False\n\
             V1,PA2,NaN,0,0,0,0\n",
        );
        match read_vote_records(&p).map_err(|e| *e) {
            Err(DashError::InvalidField {
                lineno,
                column,
                value,
                ..
            }) => {
                assert_eq!(lineno, 3);
                assert_eq!(column, "pour");
                assert_eq!(value, "NaN");
            }
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn missing_file() {
        assert!(read_parties(Path::new("/nonexistent/df_polpar.csv")).is_err());
    }
}
