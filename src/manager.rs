use crate::config::Config;
use crate::engine::Engine;
use crate::model::{State, Verdict};
use crate::stats::on_fraction;
use anyhow::{Context, Result, bail};
use std::{fmt::Display, io::Write, path::Path};

/// Drives a single run described by a [`Config`].
pub struct Manager {
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(config_file: P) -> Result<Self> {
        let cfg = Config::from_file(config_file).context("failed to construct cfg")?;
        log::info!("{cfg:#?}");

        Ok(Self { cfg })
    }

    pub fn from_config(cfg: Config) -> Self {
        Self { cfg }
    }

    /// Log and return the verdict on the configured parameters.
    pub fn validate(&self) -> Verdict {
        self.cfg.model.validate(self.cfg.init.n_agt, true)
    }

    /// Run the simulation and write one row per recorded step to `writer`.
    ///
    /// Latent states are written as `1`/`-1`, observations as `1`/`0`.
    /// The verdict is logged but never stops the run.
    pub fn simulate<W: Write>(&self, noisy: bool, writer: &mut W) -> Result<()> {
        let verdict = self.validate();
        if verdict != Verdict::Valid {
            log::warn!("running with {} parameters", verdict.name());
        }

        let noise = match (noisy, self.cfg.noise().context("failed to construct noise")?) {
            (false, _) => None,
            (true, Some(noise)) => Some(noise),
            (true, None) => bail!("noisy output requires a [noise] section"),
        };

        let mut engine = Engine::from_seed(self.cfg.model, self.cfg.init.seed)
            .context("failed to construct engine")?;

        let state = self
            .initial_state(&mut engine)
            .context("failed to generate initial state")?;
        log::info!("initial state has {} of {} agents on", state.n_on(), state.n_agt());

        let n_points = self.cfg.output.n_points;
        let warmup = self.cfg.output.warmup;

        let acc = match noise {
            None => {
                let traj = engine.raw_series(n_points, &state, warmup);
                for state in &traj.state_vec {
                    write_row(writer, state.agt_vec.iter().map(|&agt| i8::from(agt)))?;
                }
                on_fraction(&traj.on_indicator())
            }
            Some(noise) => {
                let obs = engine.noisy_series(n_points, &noise, &state, warmup);
                for row in &obs.obs_vec {
                    write_row(writer, row)?;
                }
                on_fraction(&obs.obs_vec)
            }
        };

        writer.flush().context("failed to flush writer stream")?;

        let report = acc.report();
        log::info!(
            "fraction on over {} points: mean = {:.4}, std_dev = {:.4}",
            report.n_vals,
            report.mean,
            report.std_dev
        );

        Ok(())
    }

    fn initial_state(&self, engine: &mut Engine) -> Result<State> {
        match &self.cfg.init.state {
            Some(state) => Ok(state.clone()),
            None => engine.random_state(self.cfg.init.n_agt, self.cfg.init.prob_on),
        }
    }
}

/// Write `vals` as one line separated by single spaces.
fn write_row<W, I>(writer: &mut W, vals: I) -> Result<()>
where
    W: Write,
    I: IntoIterator,
    I::Item: Display,
{
    for (i_val, val) in vals.into_iter().enumerate() {
        if i_val > 0 {
            write!(writer, " ").context("failed to write separator")?;
        }
        write!(writer, "{val}").context("failed to write value")?;
    }
    writeln!(writer).context("failed to write row")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(noise: bool) -> Config {
        let mut contents = String::new()
            + "[model]\n"
            + "s_on = 0.05\n"
            + "s_off = 0.05\n"
            + "herd = 0.002\n"
            + "\n"
            + "[init]\n"
            + "n_agt = 6\n"
            + "seed = 1\n"
            + "\n"
            + "[output]\n"
            + "n_points = 12\n"
            + "warmup = 3\n";
        if noise {
            contents += "\n[noise]\np_on = 0.9\np_off = 0.1\n";
        }
        Config::from_toml(&contents).unwrap()
    }

    fn output(mgr: &Manager, noisy: bool) -> Vec<Vec<i8>> {
        let mut buf = Vec::new();
        mgr.simulate(noisy, &mut buf).unwrap();
        String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|line| {
                line.split(' ')
                    .map(|val| val.parse().unwrap())
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    #[test]
    fn rows_are_space_separated() {
        let mut buf = Vec::new();
        write_row(&mut buf, [1i8, -1, -1, 1]).unwrap();
        write_row(&mut buf, &[0u8, 1]).unwrap();
        write_row(&mut buf, Vec::<u8>::new()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "1 -1 -1 1\n0 1\n\n");
    }

    #[test]
    fn raw_output() {
        let rows = output(&Manager::from_config(config(false)), false);
        assert_eq!(rows.len(), 12);
        for row in rows {
            assert_eq!(row.len(), 6);
            assert!(row.iter().all(|&val| val == 1 || val == -1));
        }
    }

    #[test]
    fn noisy_output() {
        let rows = output(&Manager::from_config(config(true)), true);
        assert_eq!(rows.len(), 12);
        for row in rows {
            assert_eq!(row.len(), 6);
            assert!(row.iter().all(|&val| val == 0 || val == 1));
        }
    }

    #[test]
    fn seeded_runs_repeat() {
        let mgr = Manager::from_config(config(false));
        assert_eq!(output(&mgr, false), output(&mgr, false));
    }

    #[test]
    fn noisy_requires_noise_section() {
        let mgr = Manager::from_config(config(false));
        assert!(mgr.simulate(true, &mut Vec::<u8>::new()).is_err());
    }

    #[test]
    fn invalid_parameters_still_run() {
        let mut cfg = config(false);
        cfg.model.herd = 1.0;
        let mgr = Manager::from_config(cfg);
        assert_eq!(mgr.validate(), Verdict::Invalid);
        assert_eq!(output(&mgr, false).len(), 12);
    }
}
