//! list / show 命令
//!
//! 打印指令表与单个指令的编排步骤

use clap::Args;
use sesame_choreo::{Choreography, Finish, Segment, choreography};
use sesame_protocol::{Command, CommandKind};

/// 列出所有指令
pub fn print_list() {
    println!("{:<10} {:<6} {:<8} {:<10} 收尾", "指令", "类别", "表情", "模式");
    for command in Command::ALL {
        let choreo = choreography(command);
        let (face, mode) = choreo
            .opening_face()
            .map(|(f, m)| (f.as_str(), m.as_str()))
            .unwrap_or(("-", "-"));
        println!(
            "{:<10} {:<6} {:<8} {:<10} {}",
            command.as_str(),
            kind_name(command.kind()),
            face,
            mode,
            finish_name(choreo.finish)
        );
    }
}

fn kind_name(kind: CommandKind) -> &'static str {
    match kind {
        CommandKind::Pose => "pose",
        CommandKind::Gait => "gait",
    }
}

fn finish_name(finish: Finish) -> &'static str {
    match finish {
        Finish::Stand => "stand",
        Finish::Hold => "hold",
        Finish::Idle => "idle",
    }
}

/// 编排表渲染为文本（每段一行，重复块缩进）
pub fn describe(choreo: &Choreography<'_>) -> Vec<String> {
    let mut lines = vec![format!("# {}", choreo.label)];
    for segment in choreo.segments {
        match segment {
            Segment::Face(face, mode) => lines.push(format!("face {} ({})", face, mode)),
            Segment::StandQuiet => lines.push("stand (quiet)".to_string()),
            Segment::Step(step) => lines.push(step.to_string()),
            Segment::Repeat(repeat, steps) => {
                lines.push(format!("repeat {}:", repeat));
                lines.extend(steps.iter().map(|step| format!("    {}", step)));
            },
        }
    }
    lines.push(format!("finish: {}", finish_name(choreo.finish)));
    lines
}

/// show 命令参数
#[derive(Args, Debug)]
pub struct ShowCommand {
    /// 指令名称（如 wave、forward）
    pub command: Command,
}

impl ShowCommand {
    pub fn execute(&self) {
        for line in describe(choreography(self.command)) {
            println!("{}", line);
        }
    }
}
